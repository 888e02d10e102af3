use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single untyped spreadsheet cell, as handed over by the parsing collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Empty or missing cell.
    #[default]
    Empty,
    /// Any numeric value (integers and floats alike).
    Number(Decimal),
    /// Text value, kept verbatim.
    Text(String),
    /// Boolean value.
    Bool(bool),
}

/// One spreadsheet row. Short rows behave as if padded with [`Cell::Empty`].
pub type Row = Vec<Cell>;

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Numeric value, if this cell holds a number.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if this cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell carries nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Integer value of a numeric cell, or of text holding an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Number(n) if n.fract().is_zero() => i64::try_from(*n).ok(),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n.normalize()),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<Decimal> for Cell {
    fn from(n: Decimal) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(Decimal::from(n))
    }
}

/// Cell at `index`, or [`Cell::Empty`] when the row is shorter.
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

/// A named sheet of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet (tab) name.
    pub name: String,
    /// Rows in file order.
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from a name and its rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// A parsed spreadsheet file: sheets in workbook order.
pub type Document = Vec<Sheet>;
