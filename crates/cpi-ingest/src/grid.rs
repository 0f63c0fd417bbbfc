//! Sheet grid materialization.
//!
//! Spreadsheet file handling is an external concern: the pipeline consumes
//! one CSV export per sheet and rebuilds the 2-D grid of polymorphic cell
//! values from it. Cell typing mirrors what a spreadsheet reader would
//! hand over: blanks, text, numbers, and date-typed cells.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use tracing::debug;

use cpi_model::RawCell;

use crate::error::IngestError;

/// A fully materialized sheet: cell values addressable by (row, column).
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<RawCell>>,
    column_count: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, column_count }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Cell at (row, column). Ragged or out-of-range positions read as
    /// empty, the same as a sparse sheet region.
    pub fn cell(&self, row: usize, column: usize) -> &RawCell {
        const EMPTY: &RawCell = &RawCell::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(EMPTY)
    }
}

/// Reads a sheet export into a typed grid.
pub fn read_grid(path: &Path) -> Result<Grid, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(type_cell).collect());
    }
    let grid = Grid::new(rows);
    debug!(
        path = %path.display(),
        rows = grid.row_count(),
        columns = grid.column_count(),
        "materialized sheet grid"
    );
    Ok(grid)
}

/// Types a single raw cell string.
///
/// Values with leading zeros stay textual: they are entity codes, and
/// coercing "0999" through a float would lose the zero.
pub fn type_cell(raw: &str) -> RawCell {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return RawCell::Empty;
    }
    if let Some(date) = parse_date_cell(trimmed) {
        return RawCell::Date(date);
    }
    if !has_leading_zero(trimmed)
        && let Ok(value) = trimmed.parse::<f64>()
    {
        return RawCell::Number(value);
    }
    RawCell::Text(trimmed.to_string())
}

fn has_leading_zero(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}

/// Recognizes the date renderings spreadsheet exports produce for
/// date-typed cells.
fn parse_date_cell(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}
