//! Jurisdiction tax index builder (IIBB withholdings per province).

use tracing::{debug, warn};

use super::cell::{Row, Sheet};
use super::config::ExtractionConfig;
use super::error::AlicuotaError;
use super::extract::withholding_fields;
use super::invoices::valid_invoice_number;
use super::provinces::province_name;
use super::sheets::withholding_sheet;
use super::types::JurisdictionIndex;

/// Locate the withholding sheet in `document` and index its rows.
pub fn collect_withholdings(
    document: &[Sheet],
    config: &ExtractionConfig,
) -> Result<JurisdictionIndex, AlicuotaError> {
    let sheet = withholding_sheet(document, config)?;
    config.withholding_header.verify(&sheet.name, &sheet.rows)?;
    build_jurisdiction_index(&sheet.rows, config)
}

/// Index withholding rows by invoice number and jurisdiction code.
///
/// Rows without a well-formed invoice number are skipped. Rows whose amount
/// is not a number are skipped with a warning. A jurisdiction code that is
/// not an integer in 1..=24 fails the whole build, whether or not the invoice
/// is later derived.
pub fn build_jurisdiction_index(
    rows: &[Row],
    config: &ExtractionConfig,
) -> Result<JurisdictionIndex, AlicuotaError> {
    let mut index = JurisdictionIndex::new();

    for (line, row) in rows.iter().enumerate() {
        let fields = withholding_fields(row, &config.withholding_columns);

        let Some(invoice_number) =
            valid_invoice_number(&fields.invoice_number, config.invoice_number_len)
        else {
            debug!(line, "skipping withholding row without invoice number");
            continue;
        };

        let Some(amount) = fields.amount.as_number() else {
            warn!(
                invoice = invoice_number,
                amount = %fields.amount,
                "skipping withholding with non-numeric amount"
            );
            continue;
        };

        let code = fields
            .jurisdiction_code
            .as_integer()
            .filter(|&code| province_name(code).is_some())
            .ok_or_else(|| AlicuotaError::UnknownJurisdiction {
                invoice_number: invoice_number.to_string(),
                code: fields.jurisdiction_code.to_string(),
            })?;

        index.insert(invoice_number, code, amount);
    }

    Ok(index)
}
