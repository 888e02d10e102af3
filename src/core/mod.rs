//! Spreadsheet model, validation and tax combination derivation.
//!
//! The pipeline for one parsed export is:
//! sheet selection → row extraction → invoice collection / jurisdiction
//! index → combination derivation. [`Aggregator`] runs it per file and keeps
//! the union across files.

mod aggregate;
mod cell;
mod config;
mod derive;
mod error;
mod extract;
mod invoices;
pub mod provinces;
mod sheets;
mod types;
mod withholding;

pub use aggregate::*;
pub use cell::*;
pub use config::*;
pub use derive::*;
pub use error::*;
pub use extract::*;
pub use invoices::*;
pub use provinces::{PROVINCES, province_name};
pub use sheets::*;
pub use types::*;
pub use withholding::*;
