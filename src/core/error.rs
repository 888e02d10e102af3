use thiserror::Error;

/// Errors that can occur while turning spreadsheet exports into tax combinations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlicuotaError {
    /// None of the accepted sheet names is present in the document.
    #[error("couldn't find sheet: it must be called {}", quoted(.expected))]
    SheetNotFound {
        /// The accepted aliases, in lookup order.
        expected: Vec<String>,
    },

    /// An IVA bracket is active but the invoice has no positive "Gravado" base.
    ///
    /// The export cannot be trusted once this happens, so the whole run stops.
    #[error("{invoice_number} has no \"Gravado\" to apply IVA taxes, check invoice")]
    DataIntegrity {
        /// Invoice carrying the orphan IVA amount.
        invoice_number: String,
    },

    /// A withholding row references a jurisdiction outside the province table.
    #[error("invoice {invoice_number} references unknown jurisdiction code '{code}'")]
    UnknownJurisdiction {
        /// Invoice the withholding belongs to.
        invoice_number: String,
        /// The code as it appeared in the sheet.
        code: String,
    },

    /// A configured header label does not match the sheet.
    #[error("sheet '{sheet}' column {column}: expected header '{expected}', found '{found}'")]
    SchemaMismatch {
        /// Sheet that was checked.
        sheet: String,
        /// Zero-based column offset.
        column: usize,
        /// Configured label.
        expected: String,
        /// What the sheet holds at that offset (empty if nothing).
        found: String,
    },

    /// The data directory could not be listed.
    #[error("discovery error: {0}")]
    Discovery(String),

    /// A spreadsheet file could not be opened or parsed.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Percentage arithmetic overflowed.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}
