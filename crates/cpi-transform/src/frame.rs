//! Output table construction.
//!
//! Long and wide datasets become polars `DataFrame`s with the published
//! column headers. `date_month` is re-anchored to the first day of the
//! month at this boundary, regardless of the internal month-end keys.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use cpi_model::{EnrichedRecord, LongRecord};

use crate::wide::WideTable;

/// Long-format divisions table.
pub fn divisions_frame(records: &[LongRecord]) -> PolarsResult<DataFrame> {
    let columns = vec![
        string_column("code_good_service", records.iter().map(|r| r.code.clone())),
        string_column("name_good_service", records.iter().map(|r| r.name.clone())),
        string_column("date_month", records.iter().map(|r| r.month.output_key())),
        float_column("cpi_index", records.iter().map(|r| r.cpi_index)),
        float_column("pct_change", records.iter().map(|r| r.pct_change)),
    ];
    DataFrame::new(columns)
}

/// Long-format groups table, including the curated short name.
pub fn groups_frame(records: &[EnrichedRecord]) -> PolarsResult<DataFrame> {
    let columns = vec![
        string_column("code_good_service", records.iter().map(|r| r.code.clone())),
        string_column("name_good_service", records.iter().map(|r| r.name.clone())),
        optional_string_column(
            "short_name_good_service",
            records.iter().map(|r| r.short_name.clone()),
        ),
        string_column("date_month", records.iter().map(|r| r.month.output_key())),
        float_column("cpi_index", records.iter().map(|r| r.cpi_index)),
        float_column("pct_change", records.iter().map(|r| r.pct_change)),
    ];
    DataFrame::new(columns)
}

/// Long-format foods table. Name leads, and the short name may be null
/// (the foods join is lossless).
pub fn foods_frame(records: &[EnrichedRecord]) -> PolarsResult<DataFrame> {
    let columns = vec![
        string_column("name_food", records.iter().map(|r| r.name.clone())),
        optional_string_column("short_name_food", records.iter().map(|r| r.short_name.clone())),
        string_column("code_food", records.iter().map(|r| r.code.clone())),
        string_column("date_month", records.iter().map(|r| r.month.output_key())),
        float_column("cpi_index", records.iter().map(|r| r.cpi_index)),
        float_column("pct_change", records.iter().map(|r| r.pct_change)),
    ];
    DataFrame::new(columns)
}

/// Wide-format table: date columns first, then the ordered entity columns.
pub fn wide_frame(table: &WideTable) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        string_column("date_month", table.rows.iter().map(|r| r.month.output_key())),
        string_column("date_label", table.rows.iter().map(|r| r.month.label())),
    ];
    for (idx, name) in table.columns.iter().enumerate() {
        columns.push(float_column(
            name,
            table.rows.iter().map(|row| row.values[idx]),
        ));
    }
    DataFrame::new(columns)
}

fn string_column(name: &str, values: impl Iterator<Item = String>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn optional_string_column(name: &str, values: impl Iterator<Item = Option<String>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn float_column(name: &str, values: impl Iterator<Item = Option<f64>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}
