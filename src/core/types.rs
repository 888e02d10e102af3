use std::collections::BTreeMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One validated row of the purchase book (IVA compras).
///
/// Amounts are `None` when the cell did not hold a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Point of sale + sequence, always [`super::INVOICE_NUMBER_LEN`] characters.
    pub invoice_number: String,
    /// Counterparty legal name (razón social).
    pub social_reason: String,
    /// "Gravado": base subject to IVA.
    pub tax_base: Option<Decimal>,
    /// "No Gravado".
    pub no_tax_base: Option<Decimal>,
    /// "Exento".
    pub exempt_base: Option<Decimal>,
    pub iva_5: Option<Decimal>,
    pub iva_10_5: Option<Decimal>,
    pub iva_21: Option<Decimal>,
    pub iva_27: Option<Decimal>,
    /// IVA adicional.
    pub iva_additional: Option<Decimal>,
    /// Percepción de IVA.
    pub iva_perception: Option<Decimal>,
    /// Percepción de Ganancias.
    pub earnings_perception: Option<Decimal>,
    /// Percepción de Ingresos Brutos, broken down per province in the
    /// withholding sheet.
    pub gross_income_perception: Option<Decimal>,
}

/// An invoice dropped by the self-billing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedInvoice {
    /// Invoice number as it appeared in the sheet (may be malformed).
    pub invoice_number: String,
    pub social_reason: String,
}

/// Output of the invoice collection builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCollection {
    /// Kept invoices in sheet order.
    pub invoices: Vec<InvoiceRecord>,
    /// Self-billed invoices that were skipped, in sheet order.
    pub excluded: Vec<ExcludedInvoice>,
}

/// Gross-income withholdings: invoice number → jurisdiction code → amount.
///
/// Invoices keep sheet order; jurisdictions of one invoice iterate by
/// ascending code, so the same withholdings render the same way whatever the
/// row order. A repeated code replaces the earlier amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionIndex {
    entries: IndexMap<String, BTreeMap<i64, Decimal>>,
}

impl JurisdictionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` for `code` on `invoice_number`, overwriting any previous
    /// amount for the same pair.
    pub fn insert(&mut self, invoice_number: impl Into<String>, code: i64, amount: Decimal) {
        self.entries
            .entry(invoice_number.into())
            .or_default()
            .insert(code, amount);
    }

    /// Withholdings of one invoice, if any.
    pub fn get(&self, invoice_number: &str) -> Option<&BTreeMap<i64, Decimal>> {
        self.entries.get(invoice_number)
    }

    /// Number of invoices with at least one withholding.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<i64, Decimal>)> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, i64, Decimal)> for JurisdictionIndex {
    fn from_iter<T: IntoIterator<Item = (S, i64, Decimal)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (invoice_number, code, amount) in iter {
            index.insert(invoice_number, code, amount);
        }
        index
    }
}
