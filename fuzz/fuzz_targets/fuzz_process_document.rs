#![no_main]

use alicuotas::core::{Cell, ExtractionConfig, Sheet, process_document};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fn cell(bytes: &[u8]) -> Cell {
    match bytes.first().map(|b| b % 4) {
        Some(0) | None => Cell::Empty,
        Some(1) => Cell::Text(String::from_utf8_lossy(&bytes[1..]).into_owned()),
        Some(2) => {
            let mut raw = [0u8; 8];
            let n = bytes.len().min(9) - 1;
            raw[..n].copy_from_slice(&bytes[1..=n]);
            Cell::Number(Decimal::new(i64::from_le_bytes(raw), u32::from(bytes[0]) % 29))
        }
        _ => Cell::Bool(bytes[0] & 0x80 != 0),
    }
}

fn rows(data: &[u8]) -> Vec<Vec<Cell>> {
    data.split(|b| *b == b'\n')
        .map(|line| line.split(|b| *b == b'\t').map(cell).collect())
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let mid = data.len() / 2;
    let document = vec![
        Sheet::new("LIBRO IVA COMPRAS", rows(&data[..mid])),
        Sheet::new("11040536", rows(&data[mid..])),
    ];
    // Errors are fine; panics are bugs.
    let _ = process_document(&document, &ExtractionConfig::default());
});
