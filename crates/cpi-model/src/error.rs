use thiserror::Error;

/// A header or date cell that cannot be resolved to a calendar month.
///
/// Non-fatal by default: the scanner skips the offending column. With
/// strict month handling enabled it aborts the run instead.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unparsable month token: {token:?}")]
pub struct MonthTokenError {
    pub token: String,
}

impl MonthTokenError {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Errors raised while extracting a sheet into long-format records.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured header/date rows yielded no months at all. This is a
    /// whole-sheet misconfiguration, not a per-column anomaly, so it fails
    /// fast instead of emitting an empty dataset.
    #[error(
        "structural mismatch in sheet {sheet:?}: no month columns found (header row {header_row}, date row {date_row})"
    )]
    StructuralMismatch {
        sheet: String,
        header_row: usize,
        date_row: usize,
    },

    /// Strict month handling: an index-like column carried a token that
    /// could not be parsed.
    #[error("strict month handling: column {column} of sheet {sheet:?}: {source}")]
    StrictMonthToken {
        sheet: String,
        column: usize,
        source: MonthTokenError,
    },

    /// The configured rows/columns fall outside the grid.
    #[error("sheet {sheet:?} layout out of bounds: {detail}")]
    LayoutOutOfBounds { sheet: String, detail: String },
}
