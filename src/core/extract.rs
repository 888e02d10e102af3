//! Row extractors: raw spreadsheet rows → named fields.
//!
//! Extraction never fails and never validates. Whatever sits in a column is
//! handed on unchanged; the builders decide what to keep.

use super::cell::{Cell, cell_at};
use super::config::{InvoiceColumns, WithholdingColumns};

/// Named cells of one invoices-sheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceFields {
    pub invoice_number: Cell,
    pub social_reason: Cell,
    pub tax_base: Cell,
    pub no_tax_base: Cell,
    pub exempt_base: Cell,
    pub iva_5: Cell,
    pub iva_10_5: Cell,
    pub iva_21: Cell,
    pub iva_27: Cell,
    pub iva_additional: Cell,
    pub iva_perception: Cell,
    pub earnings_perception: Cell,
    pub gross_income_perception: Cell,
}

/// Named cells of one withholding-sheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithholdingFields {
    pub invoice_number: Cell,
    pub amount: Cell,
    pub jurisdiction_code: Cell,
}

/// Read the invoice fields of `row` at the offsets in `columns`.
pub fn invoice_fields(row: &[Cell], columns: &InvoiceColumns) -> InvoiceFields {
    let at = |offset| cell_at(row, offset).clone();
    InvoiceFields {
        invoice_number: at(columns.invoice_number),
        social_reason: at(columns.social_reason),
        tax_base: at(columns.tax_base),
        no_tax_base: at(columns.no_tax_base),
        exempt_base: at(columns.exempt_base),
        iva_5: at(columns.iva_5),
        iva_10_5: at(columns.iva_10_5),
        iva_21: at(columns.iva_21),
        iva_27: at(columns.iva_27),
        iva_additional: at(columns.iva_additional),
        iva_perception: at(columns.iva_perception),
        earnings_perception: at(columns.earnings_perception),
        gross_income_perception: at(columns.gross_income_perception),
    }
}

/// Read the withholding fields of `row` at the offsets in `columns`.
pub fn withholding_fields(row: &[Cell], columns: &WithholdingColumns) -> WithholdingFields {
    WithholdingFields {
        invoice_number: cell_at(row, columns.invoice_number).clone(),
        amount: cell_at(row, columns.amount).clone(),
        jurisdiction_code: cell_at(row, columns.jurisdiction_code).clone(),
    }
}
