//! # alicuotas
//!
//! Finds every distinct tax combination in a batch of AFIP "CM03" purchase-book
//! exports: which IVA brackets apply, which perceptions (IVA, Ganancias, IVA
//! adicional) are charged and at what rate, and how Ingresos Brutos is split
//! across provinces. Each distinct combination then maps to one accounting
//! entry template.
//!
//! All amounts use [`rust_decimal::Decimal`]; percentages are rendered with
//! exactly four decimals so that identical treatments produce identical lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use alicuotas::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut row = vec![Cell::Empty; 23];
//! row[2] = "00003-00001234".into();
//! row[3] = "DISTRIBUIDORA SUR SA".into();
//! row[6] = dec!(1000).into();
//! row[12] = dec!(210).into();
//! row[21] = dec!(50).into();
//!
//! let document = vec![
//!     Sheet::new("LIBRO IVA COMPRAS", vec![row]),
//!     Sheet::new("11040536", Vec::new()),
//! ];
//! let summary = process_document(&document, &ExtractionConfig::default()).unwrap();
//! assert!(summary.combinations.contains("IV 21% IV PER 5.0000"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Cell model, extraction, validation, derivation, aggregation |
//! | `xlsx` | Read `.xlsx` exports with calamine |
//! | `discovery` | Recursive data-directory scan |
//! | `cli` | The `alicuotas` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "discovery")]
pub mod discovery;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
