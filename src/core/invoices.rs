//! Invoice collection builder.

use tracing::{debug, info};

use super::cell::{Cell, Row, Sheet};
use super::config::ExtractionConfig;
use super::error::AlicuotaError;
use super::extract::{InvoiceFields, invoice_fields};
use super::sheets::invoice_sheet;
use super::types::{ExcludedInvoice, InvoiceCollection, InvoiceRecord};

/// Locate the purchase-book sheet in `document` and build its invoice collection.
pub fn collect_invoices(
    document: &[Sheet],
    config: &ExtractionConfig,
) -> Result<InvoiceCollection, AlicuotaError> {
    let sheet = invoice_sheet(document, config)?;
    config.invoice_header.verify(&sheet.name, &sheet.rows)?;
    Ok(build_invoice_collection(&sheet.rows, config))
}

/// Turn purchase-book rows into invoice records.
///
/// Self-billed rows (social reason starting with the exclusion code) are
/// reported in [`InvoiceCollection::excluded`] whatever else they contain.
/// Rows without a well-formed invoice number are headers, subtotals and the
/// like, and are dropped silently.
pub fn build_invoice_collection(rows: &[Row], config: &ExtractionConfig) -> InvoiceCollection {
    let mut collection = InvoiceCollection::default();

    for (line, row) in rows.iter().enumerate() {
        let fields = invoice_fields(row, &config.invoice_columns);

        if !is_social_reason_valid(&fields.social_reason, config) {
            info!(
                invoice = %fields.invoice_number,
                social_reason = %fields.social_reason,
                "invoice with taxes ignored according to social reason"
            );
            collection.excluded.push(ExcludedInvoice {
                invoice_number: fields.invoice_number.to_string(),
                social_reason: fields.social_reason.to_string(),
            });
            continue;
        }

        match valid_invoice_number(&fields.invoice_number, config.invoice_number_len) {
            Some(number) => {
                let number = number.to_string();
                collection.invoices.push(into_record(number, fields));
            }
            None => debug!(line, "skipping row without invoice number"),
        }
    }

    collection
}

/// `false` when the first characters of `social_reason`, lower-cased, equal
/// the configured exclusion code.
pub fn is_social_reason_valid(social_reason: &Cell, config: &ExtractionConfig) -> bool {
    let prefix: String = social_reason
        .to_string()
        .chars()
        .take(config.exclusion_prefix_len)
        .collect();
    prefix.to_lowercase() != config.exclusion_code
}

/// The invoice number, if `cell` is text of exactly `len` characters.
pub fn valid_invoice_number(cell: &Cell, len: usize) -> Option<&str> {
    cell.as_text().filter(|s| s.chars().count() == len)
}

fn into_record(invoice_number: String, fields: InvoiceFields) -> InvoiceRecord {
    InvoiceRecord {
        invoice_number,
        social_reason: fields.social_reason.to_string(),
        tax_base: fields.tax_base.as_number(),
        no_tax_base: fields.no_tax_base.as_number(),
        exempt_base: fields.exempt_base.as_number(),
        iva_5: fields.iva_5.as_number(),
        iva_10_5: fields.iva_10_5.as_number(),
        iva_21: fields.iva_21.as_number(),
        iva_27: fields.iva_27.as_number(),
        iva_additional: fields.iva_additional.as_number(),
        iva_perception: fields.iva_perception.as_number(),
        earnings_perception: fields.earnings_perception.as_number(),
        gross_income_perception: fields.gross_income_perception.as_number(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice_row(number: Cell, social_reason: &str) -> Row {
        let mut row = vec![Cell::Empty; 23];
        row[2] = number;
        row[3] = social_reason.into();
        row[6] = dec!(1000).into();
        row[12] = dec!(210).into();
        row
    }

    #[test]
    fn keeps_valid_rows_in_order() {
        let config = ExtractionConfig::default();
        let rows = vec![
            invoice_row("00001-00000002".into(), "B SA"),
            invoice_row("00001-00000001".into(), "A SRL"),
        ];
        let c = build_invoice_collection(&rows, &config);
        let numbers: Vec<_> = c.invoices.iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(numbers, vec!["00001-00000002", "00001-00000001"]);
        assert_eq!(c.invoices[0].tax_base, Some(dec!(1000)));
        assert_eq!(c.invoices[0].iva_21, Some(dec!(210)));
        assert!(c.excluded.is_empty());
    }

    #[test]
    fn self_billing_is_excluded_case_insensitively() {
        let config = ExtractionConfig::default();
        let rows = vec![
            invoice_row("00001-00000001".into(), "GS BCRIO S.A."),
            invoice_row("00001-00000002".into(), "Gs BcRiO"),
            invoice_row("00001-00000003".into(), "GS BCRI"),
        ];
        let c = build_invoice_collection(&rows, &config);
        assert_eq!(c.invoices.len(), 1);
        assert_eq!(c.invoices[0].invoice_number, "00001-00000003");
        assert_eq!(
            c.excluded,
            vec![
                ExcludedInvoice {
                    invoice_number: "00001-00000001".into(),
                    social_reason: "GS BCRIO S.A.".into(),
                },
                ExcludedInvoice {
                    invoice_number: "00001-00000002".into(),
                    social_reason: "Gs BcRiO".into(),
                },
            ]
        );
    }

    #[test]
    fn exclusion_applies_even_to_malformed_numbers() {
        let config = ExtractionConfig::default();
        let rows = vec![invoice_row("123".into(), "gs bcrio")];
        let c = build_invoice_collection(&rows, &config);
        assert!(c.invoices.is_empty());
        assert_eq!(c.excluded.len(), 1);
    }

    #[test]
    fn invoice_number_must_be_fourteen_char_text() {
        let config = ExtractionConfig::default();
        let rows = vec![
            invoice_row("Comprobante".into(), "Razón Social"),
            invoice_row("00001-0000001".into(), "X"),
            invoice_row("00001-000000001".into(), "X"),
            invoice_row(Cell::Number(dec!(10000000000001)), "X"),
            invoice_row(Cell::Empty, "Total"),
        ];
        let c = build_invoice_collection(&rows, &config);
        assert!(c.invoices.is_empty());
        assert!(c.excluded.is_empty());
    }

    #[test]
    fn text_amounts_are_not_numbers() {
        let config = ExtractionConfig::default();
        let mut row = invoice_row("00001-00000001".into(), "X");
        row[6] = "1000".into();
        let c = build_invoice_collection(&[row], &config);
        assert_eq!(c.invoices[0].tax_base, None);
    }

    #[test]
    fn collect_requires_invoice_sheet() {
        let config = ExtractionConfig::default();
        let doc = vec![Sheet::new("11040536", Vec::new())];
        assert!(matches!(
            collect_invoices(&doc, &config),
            Err(AlicuotaError::SheetNotFound { .. })
        ));
    }
}
