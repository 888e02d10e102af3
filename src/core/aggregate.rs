//! Per-document pipeline and cross-file aggregation.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::cell::Sheet;
use super::config::ExtractionConfig;
use super::derive::derive_combinations;
use super::error::AlicuotaError;
use super::invoices::collect_invoices;
use super::types::ExcludedInvoice;
use super::withholding::collect_withholdings;

/// What one spreadsheet contributed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Invoices kept after validation.
    pub invoices: usize,
    /// Invoices with withholdings in the jurisdiction index.
    pub withheld_invoices: usize,
    /// Self-billed invoices that were skipped.
    pub excluded: Vec<ExcludedInvoice>,
    /// Distinct combination lines of this document.
    pub combinations: BTreeSet<String>,
}

/// Run invoice collection, withholding indexing and derivation on one
/// parsed spreadsheet.
pub fn process_document(
    document: &[Sheet],
    config: &ExtractionConfig,
) -> Result<DocumentSummary, AlicuotaError> {
    let collection = collect_invoices(document, config)?;
    let index = collect_withholdings(document, config)?;
    let combinations = derive_combinations(&collection.invoices, &index)?;

    Ok(DocumentSummary {
        invoices: collection.invoices.len(),
        withheld_invoices: index.len(),
        excluded: collection.excluded,
        combinations,
    })
}

/// Length first, then lexicographic.
pub fn by_length(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.cmp(b))
}

/// Union of combination lines across any number of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationSet {
    lines: BTreeSet<String>,
}

impl CombinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge lines in; returns how many were not seen before.
    pub fn merge<I: IntoIterator<Item = String>>(&mut self, lines: I) -> usize {
        let before = self.lines.len();
        self.lines.extend(lines);
        self.lines.len() - before
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines ordered by length, ties broken lexicographically.
    pub fn sorted(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.lines.iter().cloned().collect();
        lines.sort_by(|a, b| by_length(a, b));
        lines
    }
}

impl<S: Into<String>> FromIterator<S> for CombinationSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-file entry of a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the data directory.
    pub path: String,
    pub invoices: usize,
    pub excluded: Vec<ExcludedInvoice>,
    /// Distinct combinations found in this file alone.
    pub combinations: usize,
}

/// Outcome of a full run over a batch of files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Every distinct combination, ordered by [`by_length`].
    pub combinations: Vec<String>,
}

/// Accumulates documents one at a time, in processing order.
#[derive(Debug, Default)]
pub struct Aggregator {
    config: ExtractionConfig,
    set: CombinationSet,
    files: Vec<FileReport>,
}

impl Aggregator {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Process one parsed file and fold its combinations into the running set.
    pub fn add_document(
        &mut self,
        path: impl Into<String>,
        document: &[Sheet],
    ) -> Result<&FileReport, AlicuotaError> {
        let path = path.into();
        let summary = process_document(document, &self.config)?;
        let found = summary.combinations.len();
        let new = self.set.merge(summary.combinations);
        info!(
            file = %path,
            invoices = summary.invoices,
            combinations = found,
            new,
            "processed file"
        );

        self.files.push(FileReport {
            path,
            invoices: summary.invoices,
            excluded: summary.excluded,
            combinations: found,
        });
        Ok(&self.files[self.files.len() - 1])
    }

    /// Combinations seen so far.
    pub fn combinations(&self) -> &CombinationSet {
        &self.set
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            combinations: self.set.sorted(),
            files: self.files,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(
                f,
                "{}: {} invoices, {} combinations",
                file.path, file.invoices, file.combinations
            )?;
            for ex in &file.excluded {
                writeln!(
                    f,
                    "  {} ignored according to \"Razón social: {}\"",
                    ex.invoice_number, ex.social_reason
                )?;
            }
        }
        writeln!(
            f,
            "FOUND {} UNIQUE TAX COMBINATION:",
            self.combinations.len()
        )?;
        for line in &self.combinations {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
