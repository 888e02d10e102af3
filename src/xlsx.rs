//! Spreadsheet reading via calamine.
//!
//! Converts every worksheet of a workbook into a [`Sheet`]. Column positions
//! are absolute: when the used range does not start in column A, rows are
//! left-padded so that offset 0 is always column A.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{AlicuotaError, Cell, Document, Row, Sheet};

/// Read every worksheet of the workbook at `path`, in workbook order.
pub fn read_document(path: impl AsRef<Path>) -> Result<Document, AlicuotaError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AlicuotaError::Spreadsheet(format!("{}: {e}", path.display())))?;

    let mut document = Document::new();
    for (name, range) in workbook.worksheets() {
        let rows = range_rows(&range);
        debug!(sheet = %name, rows = rows.len(), "read worksheet");
        document.push(Sheet::new(name, rows));
    }
    Ok(document)
}

fn range_rows(range: &Range<Data>) -> Vec<Row> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Row> = (0..first_row).map(|_| Row::new()).collect();
    for data in range.rows() {
        let mut row = vec![Cell::Empty; first_col as usize];
        row.extend(data.iter().map(to_cell));
        rows.push(row);
    }
    rows
}

/// Map one calamine value onto the crate's cell model.
pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Float(f) => float_cell(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => float_cell(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn float_cell(f: f64) -> Cell {
    Decimal::try_from(f).map_or(Cell::Empty, Cell::Number)
}
