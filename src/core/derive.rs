//! Tax combination derivation.
//!
//! Every invoice is reduced to one line describing its tax treatment:
//!
//! ```text
//! IV 21% IV PER 3.0000 GAN 2.0000 BUENOS AIRES: 1.5000 CORDOBA: 0.5000
//! └─ IVA ┘ └─ other taxes (% of Gravado) ┘ └─ IIBB per province (% of base) ┘
//! ```
//!
//! Two invoices with the same treatment produce byte-identical lines, which
//! makes the line usable as a deduplication key.

use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::AlicuotaError;
use super::provinces::province_name;
use super::types::{InvoiceRecord, JurisdictionIndex};

/// Decimal places of every rendered percentage.
pub const PERCENT_DP: u32 = 4;

/// Statutory IVA rates an invoice can be subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatBracket {
    Five,
    TenPointFive,
    TwentyOne,
    TwentySeven,
}

impl VatBracket {
    /// All brackets in rendering order.
    pub const ALL: [VatBracket; 4] = [
        VatBracket::Five,
        VatBracket::TenPointFive,
        VatBracket::TwentyOne,
        VatBracket::TwentySeven,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Five => "IV 5%",
            Self::TenPointFive => "IV 10.5%",
            Self::TwentyOne => "IV 21%",
            Self::TwentySeven => "IV 27%",
        }
    }

    /// The invoice column that marks this bracket active.
    pub fn amount(&self, invoice: &InvoiceRecord) -> Option<Decimal> {
        match self {
            Self::Five => invoice.iva_5,
            Self::TenPointFive => invoice.iva_10_5,
            Self::TwentyOne => invoice.iva_21,
            Self::TwentySeven => invoice.iva_27,
        }
    }
}

/// Taxes expressed as a percentage of "Gravado".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtherTax {
    IvaAdditional,
    IvaPerception,
    EarningsPerception,
}

impl OtherTax {
    /// All taxes in rendering order.
    pub const ALL: [OtherTax; 3] = [
        OtherTax::IvaAdditional,
        OtherTax::IvaPerception,
        OtherTax::EarningsPerception,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::IvaAdditional => "IV AD",
            Self::IvaPerception => "IV PER",
            Self::EarningsPerception => "GAN",
        }
    }

    pub fn amount(&self, invoice: &InvoiceRecord) -> Option<Decimal> {
        match self {
            Self::IvaAdditional => invoice.iva_additional,
            Self::IvaPerception => invoice.iva_perception,
            Self::EarningsPerception => invoice.earnings_perception,
        }
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| v.is_sign_positive() && !v.is_zero())
}

/// `amount / base * 100`, rounded half away from zero to [`PERCENT_DP`] places.
pub fn percentage(amount: Decimal, base: Decimal) -> Result<Decimal, AlicuotaError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(base))
        .map(|p| p.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| AlicuotaError::Arithmetic(format!("{amount} / {base} * 100 overflows")))
}

/// Render a percentage with exactly [`PERCENT_DP`] decimals.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.*}", PERCENT_DP as usize, value)
}

/// Active IVA brackets, e.g. `"IV 10.5% IV 21%"`.
///
/// An active bracket without a positive "Gravado" means the export is
/// corrupt: this fails with [`AlicuotaError::DataIntegrity`].
pub fn vat_brackets(invoice: &InvoiceRecord) -> Result<String, AlicuotaError> {
    let tags: Vec<&str> = VatBracket::ALL
        .iter()
        .filter(|b| positive(b.amount(invoice)).is_some())
        .map(|b| b.tag())
        .collect();

    if !tags.is_empty() && positive(invoice.tax_base).is_none() {
        return Err(AlicuotaError::DataIntegrity {
            invoice_number: invoice.invoice_number.clone(),
        });
    }

    Ok(tags.join(" "))
}

/// IVA adicional, IVA perception and earnings perception as a percentage of
/// "Gravado", e.g. `"IV AD 21.0000 GAN 2.0000"`. Empty without a positive base.
pub fn other_taxes(invoice: &InvoiceRecord) -> Result<String, AlicuotaError> {
    let Some(base) = positive(invoice.tax_base) else {
        return Ok(String::new());
    };

    let mut parts = Vec::new();
    for tax in OtherTax::ALL {
        if let Some(amount) = positive(tax.amount(invoice)) {
            let pct = percentage(amount, base)?;
            parts.push(format!("{} {}", tax.tag(), format_percentage(pct)));
        }
    }
    Ok(parts.join(" "))
}

/// Base for IIBB percentages: "Gravado", else "No Gravado", else "Exento",
/// whichever is first positive.
pub fn gross_income_base(invoice: &InvoiceRecord) -> Option<Decimal> {
    positive(invoice.tax_base)
        .or_else(|| positive(invoice.no_tax_base))
        .or_else(|| positive(invoice.exempt_base))
}

/// IIBB withholdings per province as a percentage of the gross-income base,
/// e.g. `"BUENOS AIRES: 1.5000 CORDOBA: 0.5000"`.
///
/// Empty when the invoice has no positive IIBB perception or no positive
/// base. Provinces are listed by ascending jurisdiction code; those whose
/// percentage rounds to zero are left out.
pub fn gross_income_by_jurisdiction(
    invoice: &InvoiceRecord,
    index: &JurisdictionIndex,
) -> Result<String, AlicuotaError> {
    if positive(invoice.gross_income_perception).is_none() {
        return Ok(String::new());
    }
    let Some(base) = gross_income_base(invoice) else {
        return Ok(String::new());
    };
    let Some(withholdings) = index.get(&invoice.invoice_number) else {
        return Ok(String::new());
    };

    let mut parts = Vec::new();
    for (&code, &amount) in withholdings {
        let province = province_name(code).ok_or_else(|| AlicuotaError::UnknownJurisdiction {
            invoice_number: invoice.invoice_number.clone(),
            code: code.to_string(),
        })?;
        let pct = percentage(amount, base)?;
        if pct.is_zero() {
            continue;
        }
        parts.push(format!("{province}: {}", format_percentage(pct)));
    }
    Ok(parts.join(" "))
}

/// Full combination line of one invoice, or `None` when it carries no tax.
pub fn combination(
    invoice: &InvoiceRecord,
    index: &JurisdictionIndex,
) -> Result<Option<String>, AlicuotaError> {
    let parts = [
        vat_brackets(invoice)?,
        other_taxes(invoice)?,
        gross_income_by_jurisdiction(invoice, index)?,
    ];
    let line = parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    Ok((!line.is_empty()).then_some(line))
}

/// Distinct combination lines of a set of invoices.
///
/// Stops at the first invoice that fails; nothing is returned for the
/// invoices processed before it.
pub fn derive_combinations(
    invoices: &[InvoiceRecord],
    index: &JurisdictionIndex,
) -> Result<BTreeSet<String>, AlicuotaError> {
    let mut combinations = BTreeSet::new();
    for invoice in invoices {
        if let Some(line) = combination(invoice, index)? {
            combinations.insert(line);
        }
    }
    Ok(combinations)
}
