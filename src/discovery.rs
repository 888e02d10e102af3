//! Data-directory discovery.
//!
//! Lists the export files to process: everything under the data directory
//! (recursively) whose name ends with the spreadsheet extension and contains
//! the report marker.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::AlicuotaError;

/// Where to look for exports and how to recognise them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Root of the recursive scan.
    pub data_dir: PathBuf,
    /// Required file-name suffix.
    pub extension: String,
    /// Substring identifying the report type.
    pub marker: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            extension: ".xlsx".into(),
            marker: "CM03".into(),
        }
    }
}

impl DiscoveryConfig {
    /// Defaults overridden by `ALICUOTAS_DATA_DIR` and `ALICUOTAS_MARKER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("ALICUOTAS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            marker: std::env::var("ALICUOTAS_MARKER").unwrap_or(defaults.marker),
            extension: defaults.extension,
        }
    }

    /// Whether a path relative to the data directory names an export.
    pub fn matches(&self, relative: &str) -> bool {
        relative.ends_with(&self.extension) && relative.contains(&self.marker)
    }
}

/// Export files under `config.data_dir`, relative to it and sorted.
pub fn discover(config: &DiscoveryConfig) -> Result<Vec<PathBuf>, AlicuotaError> {
    let root = config.data_dir.as_path();
    if !root.is_dir() {
        return Err(AlicuotaError::Discovery(format!(
            "{} is not a readable directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| AlicuotaError::Discovery(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_to(root, entry.path());
        if config.matches(&relative.to_string_lossy()) {
            files.push(relative);
        } else {
            debug!(path = %relative.display(), "not an export, skipping");
        }
    }
    Ok(files)
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_extension_and_marker() {
        let config = DiscoveryConfig::default();
        assert!(config.matches("2024/CM03 enero.xlsx"));
        assert!(config.matches("CM03.xlsx"));
        assert!(!config.matches("CM03 enero.xls"));
        assert!(!config.matches("CM05 enero.xlsx"));
        assert!(!config.matches("CM03 enero.xlsx.bak"));
    }

    #[test]
    fn missing_directory_is_a_discovery_error() {
        let config = DiscoveryConfig {
            data_dir: PathBuf::from("/nonexistent/alicuotas-data"),
            ..Default::default()
        };
        assert!(matches!(discover(&config), Err(AlicuotaError::Discovery(_))));
    }
}
