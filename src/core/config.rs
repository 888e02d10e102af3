use serde::{Deserialize, Serialize};

use super::cell::{Cell, Row, cell_at};
use super::error::AlicuotaError;

/// Invoices sheet names accepted in AFIP purchase-book exports.
pub const INVOICE_SHEET_ALIASES: &[&str] = &["LIBRO IVA COMPRAS", "IVA COMPRAS"];

/// Gross-income withholding sheet name.
pub const WITHHOLDING_SHEET_ALIASES: &[&str] = &["11040536"];

/// Lower-cased counterparty prefix marking self-billed invoices.
pub const SELF_BILLING_CODE: &str = "gs bcrio";

/// Length of a well-formed invoice number (point of sale + sequence).
pub const INVOICE_NUMBER_LEN: usize = 14;

/// Column offsets of the invoices sheet (zero-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceColumns {
    pub invoice_number: usize,
    pub social_reason: usize,
    /// "Gravado".
    pub tax_base: usize,
    /// "No Gravado".
    pub no_tax_base: usize,
    /// "Exento".
    pub exempt_base: usize,
    pub iva_21: usize,
    pub iva_27: usize,
    pub iva_10_5: usize,
    pub iva_5: usize,
    pub iva_additional: usize,
    pub earnings_perception: usize,
    pub iva_perception: usize,
    pub gross_income_perception: usize,
}

impl Default for InvoiceColumns {
    fn default() -> Self {
        Self {
            invoice_number: 2,
            social_reason: 3,
            tax_base: 6,
            no_tax_base: 7,
            exempt_base: 8,
            iva_21: 12,
            iva_27: 14,
            iva_10_5: 16,
            iva_5: 18,
            iva_additional: 19,
            earnings_perception: 20,
            iva_perception: 21,
            gross_income_perception: 22,
        }
    }
}

impl InvoiceColumns {
    /// Field name → offset pairs, in column order.
    pub fn fields(&self) -> Vec<(&'static str, usize)> {
        let mut fields = vec![
            ("invoice_number", self.invoice_number),
            ("social_reason", self.social_reason),
            ("tax_base", self.tax_base),
            ("no_tax_base", self.no_tax_base),
            ("exempt_base", self.exempt_base),
            ("iva_21", self.iva_21),
            ("iva_27", self.iva_27),
            ("iva_10_5", self.iva_10_5),
            ("iva_5", self.iva_5),
            ("iva_additional", self.iva_additional),
            ("earnings_perception", self.earnings_perception),
            ("iva_perception", self.iva_perception),
            ("gross_income_perception", self.gross_income_perception),
        ];
        fields.sort_by_key(|(_, offset)| *offset);
        fields
    }
}

/// Column offsets of the withholding sheet (zero-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingColumns {
    pub invoice_number: usize,
    pub amount: usize,
    pub jurisdiction_code: usize,
}

impl Default for WithholdingColumns {
    fn default() -> Self {
        Self {
            invoice_number: 3,
            amount: 4,
            jurisdiction_code: 5,
        }
    }
}

impl WithholdingColumns {
    /// Field name → offset pairs, in column order.
    pub fn fields(&self) -> Vec<(&'static str, usize)> {
        let mut fields = vec![
            ("invoice_number", self.invoice_number),
            ("amount", self.amount),
            ("jurisdiction_code", self.jurisdiction_code),
        ];
        fields.sort_by_key(|(_, offset)| *offset);
        fields
    }
}

/// Expected header labels keyed by column offset.
///
/// Empty means "don't check". Otherwise some row of the sheet must carry every
/// label at its offset (trimmed, case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCheck {
    pub labels: Vec<(usize, String)>,
}

impl HeaderCheck {
    /// Verify the labels against `rows`. On failure, reports the first
    /// mismatching label of the row that matched the most labels.
    pub fn verify(&self, sheet: &str, rows: &[Row]) -> Result<(), AlicuotaError> {
        if self.labels.is_empty() {
            return Ok(());
        }

        let matches = |row: &[Cell], (column, label): &(usize, String)| {
            cell_at(row, *column)
                .to_string()
                .trim()
                .eq_ignore_ascii_case(label.trim())
        };

        let mut closest: Option<(usize, &Row)> = None;
        for row in rows {
            let matched = self.labels.iter().filter(|l| matches(row.as_slice(), *l)).count();
            if matched == self.labels.len() {
                return Ok(());
            }
            if closest.is_none_or(|(best, _)| matched > best) {
                closest = Some((matched, row));
            }
        }

        let empty = Row::new();
        let row = closest.map_or(&empty, |(_, row)| row);
        let (column, expected) = self
            .labels
            .iter()
            .find(|l| !matches(row.as_slice(), *l))
            .unwrap_or(&self.labels[0]);
        Err(AlicuotaError::SchemaMismatch {
            sheet: sheet.to_string(),
            column: *column,
            expected: expected.clone(),
            found: cell_at(row, *column).to_string(),
        })
    }
}

/// Everything the extraction pipeline needs to know about the export layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Accepted names of the invoices sheet, in lookup order.
    pub invoice_sheets: Vec<String>,
    /// Accepted names of the withholding sheet, in lookup order.
    pub withholding_sheets: Vec<String>,
    /// Lower-cased social-reason prefix that excludes an invoice.
    pub exclusion_code: String,
    /// How many leading characters of the social reason are compared.
    pub exclusion_prefix_len: usize,
    /// Required invoice number length.
    pub invoice_number_len: usize,
    pub invoice_columns: InvoiceColumns,
    pub withholding_columns: WithholdingColumns,
    pub invoice_header: HeaderCheck,
    pub withholding_header: HeaderCheck,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            invoice_sheets: INVOICE_SHEET_ALIASES.iter().map(|s| s.to_string()).collect(),
            withholding_sheets: WITHHOLDING_SHEET_ALIASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclusion_code: SELF_BILLING_CODE.into(),
            exclusion_prefix_len: 8,
            invoice_number_len: INVOICE_NUMBER_LEN,
            invoice_columns: InvoiceColumns::default(),
            withholding_columns: WithholdingColumns::default(),
            invoice_header: HeaderCheck::default(),
            withholding_header: HeaderCheck::default(),
        }
    }
}
