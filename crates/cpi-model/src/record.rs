use crate::month::MonthEnd;

/// One month located by the column-map scan.
///
/// Invariant: when a percent column is present it is always the immediate
/// right neighbor of the index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthColumnEntry {
    pub month: MonthEnd,
    pub index_column: usize,
    pub percent_column: Option<usize>,
}

/// Tidy long-format observation: one row per (entity, month) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub code: String,
    pub name: String,
    pub month: MonthEnd,
    pub cpi_index: Option<f64>,
    pub pct_change: Option<f64>,
}

/// A long record joined against a curated lookup table.
///
/// `short_name` is always present for the groups dataset (strict join) and
/// may be absent for foods (lossless join).
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub code: String,
    pub name: String,
    pub short_name: Option<String>,
    pub month: MonthEnd,
    pub cpi_index: Option<f64>,
    pub pct_change: Option<f64>,
}

impl EnrichedRecord {
    /// Display name for wide-format columns: the curated short name when
    /// the lookup matched, otherwise the raw sheet name.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}
