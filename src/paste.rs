//! Clipboard-to-table parser.
//!
//! Turns tab/newline-delimited text (as copied from a spreadsheet range) into
//! year records and merges it into an existing collection. The input
//! collection is never touched: the result is a fresh, year-sorted copy.

use crate::format::{parse_formatted_number, parse_leading_float, round_half_up};
use crate::models::{CropList, DataRecord};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasteError {
    #[error("No data found in clipboard")]
    NoData,
    #[error("Failed to parse clipboard data: {0}")]
    Malformed(String),
}

/// Outcome of a successful paste.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteReport {
    /// Merged collection, sorted ascending by year.
    pub data: Vec<DataRecord>,
    /// Lines that produced a year (new or existing record).
    pub rows_applied: usize,
    /// Non-empty lines ignored (single cell or no leading year).
    pub rows_skipped: usize,
    /// Years that did not exist before the paste.
    pub years_added: Vec<i32>,
}

/// Merge pasted text into `data`, mapping cells 1..N positionally onto `crops`.
///
/// Value cells have `,` and `.` removed before parsing, so both act as
/// thousands grouping symbols (`"1.234"` and `"1,234"` both read as `1234`).
pub fn parse_clipboard(
    text: &str,
    data: &[DataRecord],
    crops: &CropList,
) -> Result<PasteReport, PasteError> {
    let rows: Vec<&str> = text.split('\n').filter(|r| !r.trim().is_empty()).collect();
    if rows.is_empty() {
        return Err(PasteError::NoData);
    }

    let mut out: Vec<DataRecord> = data.to_vec();
    let mut rows_applied = 0usize;
    let mut rows_skipped = 0usize;
    let mut years_added: Vec<i32> = Vec::new();

    for row in rows {
        let cells: Vec<&str> = row.split('\t').map(str::trim).collect();
        if cells.len() <= 1 {
            rows_skipped += 1;
            continue;
        }

        let Some(year) = parse_formatted_number(cells[0]) else {
            log::debug!("paste: skipping row without a leading year: {row:?}");
            rows_skipped += 1;
            continue;
        };
        let year = i32::try_from(year)
            .map_err(|_| PasteError::Malformed(format!("year out of range: {}", cells[0])))?;

        let idx = match out.iter().position(|r| r.year == year) {
            Some(i) => i,
            None => {
                out.push(DataRecord::zeroed(year, crops));
                years_added.push(year);
                out.len() - 1
            }
        };
        let record = &mut out[idx];

        let n = (cells.len() - 1).min(crops.len());
        for (cell, crop) in cells[1..=n].iter().zip(crops.iter()) {
            if let Some(v) = parse_value_cell(cell) {
                record.set(crop, v);
            }
        }
        rows_applied += 1;
    }

    out.sort_by_key(|r| r.year);
    log::info!(
        "paste: {} row(s) applied, {} skipped, {} new year(s)",
        rows_applied,
        rows_skipped,
        years_added.len()
    );

    Ok(PasteReport {
        data: out,
        rows_applied,
        rows_skipped,
        years_added,
    })
}

/// `None` for cells without a leading number or whose value does not fit an `i64`.
fn parse_value_cell(cell: &str) -> Option<i64> {
    let cleaned: String = cell.chars().filter(|c| *c != ',' && *c != '.').collect();
    parse_leading_float(&cleaned)
        .filter(|v| (I64_LOWER..I64_UPPER).contains(v))
        .map(round_half_up)
}

// Exact f64 bounds of the i64 range (upper bound exclusive).
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
