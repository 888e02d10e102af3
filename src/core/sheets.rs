use super::cell::Sheet;
use super::config::ExtractionConfig;
use super::error::AlicuotaError;

/// First sheet of `document` whose name equals one of `aliases` exactly.
///
/// There is no fallback: a document without a recognised sheet is rejected.
pub fn find_sheet<'a, S: AsRef<str>>(
    document: &'a [Sheet],
    aliases: &[S],
) -> Result<&'a Sheet, AlicuotaError> {
    document
        .iter()
        .find(|sheet| aliases.iter().any(|a| a.as_ref() == sheet.name))
        .ok_or_else(|| AlicuotaError::SheetNotFound {
            expected: aliases.iter().map(|a| a.as_ref().to_string()).collect(),
        })
}

/// The purchase-book sheet ("LIBRO IVA COMPRAS" / "IVA COMPRAS" by default).
pub fn invoice_sheet<'a>(
    document: &'a [Sheet],
    config: &ExtractionConfig,
) -> Result<&'a Sheet, AlicuotaError> {
    find_sheet(document, config.invoice_sheets.as_slice())
}

/// The gross-income withholding sheet ("11040536" by default).
pub fn withholding_sheet<'a>(
    document: &'a [Sheet],
    config: &ExtractionConfig,
) -> Result<&'a Sheet, AlicuotaError> {
    find_sheet(document, config.withholding_sheets.as_slice())
}
