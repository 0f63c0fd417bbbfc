//! Sheet Extractor: month map + data region -> tidy long records.

use tracing::{debug, info};

use cpi_ingest::Grid;
use cpi_model::{ExtractError, LongRecord, RawCell, SheetLayout};

use crate::scan::{build_month_map, build_month_map_strict};

/// Extracts one sheet into long format: one record per (entity, month).
///
/// Per-column anomalies degrade silently (that is the scanner's job), but
/// a sheet that yields no months at all is a misconfiguration and fails
/// loudly rather than producing an empty dataset. Output is sorted by
/// `(code, month)` ascending; later stages rely on that ordering.
pub fn extract_sheet(
    grid: &Grid,
    layout: &SheetLayout,
    strict_months: bool,
) -> Result<Vec<LongRecord>, ExtractError> {
    let first_data_column = layout.first_data_column();
    let months = if strict_months {
        build_month_map_strict(grid, layout.header_row, layout.date_row, first_data_column)
            .map_err(|abort| ExtractError::StrictMonthToken {
                sheet: layout.name.clone(),
                column: abort.column,
                source: abort.error,
            })?
    } else {
        build_month_map(grid, layout.header_row, layout.date_row, first_data_column)
    };

    if months.is_empty() {
        return Err(ExtractError::StructuralMismatch {
            sheet: layout.name.clone(),
            header_row: layout.header_row,
            date_row: layout.date_row,
        });
    }
    if layout.data_start_row >= grid.row_count() {
        return Err(ExtractError::LayoutOutOfBounds {
            sheet: layout.name.clone(),
            detail: format!(
                "data starts at row {} but the sheet has {} rows",
                layout.data_start_row,
                grid.row_count()
            ),
        });
    }

    // Base entity table: (code, name) per data row. Rows without a code
    // are blank trailing rows in the source region.
    let mut base: Vec<(usize, String, String)> = Vec::new();
    for row in layout.data_start_row..grid.row_count() {
        let Some(code) = grid.cell(row, layout.code_column).as_code() else {
            continue;
        };
        let name = cell_text(grid.cell(row, layout.name_column));
        base.push((row, code, name));
    }
    debug!(
        sheet = %layout.name,
        months = months.len(),
        entities = base.len(),
        "extracting sheet"
    );

    let mut records = Vec::with_capacity(base.len() * months.len());
    for entry in &months {
        for (row, code, name) in &base {
            let cpi_index = grid.cell(*row, entry.index_column).as_number();
            let pct_change = entry
                .percent_column
                .and_then(|column| grid.cell(*row, column).as_number());
            records.push(LongRecord {
                code: code.clone(),
                name: name.clone(),
                month: entry.month,
                cpi_index,
                pct_change,
            });
        }
    }

    records.sort_by(|a, b| a.code.cmp(&b.code).then(a.month.cmp(&b.month)));
    info!(sheet = %layout.name, records = records.len(), "extracted long records");
    Ok(records)
}

fn cell_text(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Text(s) => s.trim().to_string(),
        RawCell::Number(v) => format!("{v}"),
        RawCell::Date(d) => d.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use cpi_model::MonthEnd;

    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.into())
    }

    fn num(v: f64) -> RawCell {
        RawCell::Number(v)
    }

    fn layout() -> SheetLayout {
        SheetLayout {
            name: "test sheet".into(),
            file: String::new(),
            code_column: 0,
            name_column: 2,
            header_row: 0,
            date_row: 0,
            data_start_row: 1,
        }
    }

    /// Two months, only the first with a percent column; one blank row and
    /// one non-numeric index cell along the way.
    fn sample_grid() -> Grid {
        Grid::new(vec![
            vec![
                text("Code"),
                RawCell::Empty,
                text("Name"),
                text("Dec.2022"),
                text("% change"),
                text("Jan 2023"),
            ],
            vec![text("0999"), RawCell::Empty, text("All items"), num(104.2), num(0.4), num(105.1)],
            vec![text("999.0"), RawCell::Empty, text("Alpha"), text("n/a"), num(-0.1), num(98.6)],
            vec![RawCell::Empty, RawCell::Empty, RawCell::Empty, RawCell::Empty, RawCell::Empty, RawCell::Empty],
        ])
    }

    #[test]
    fn produces_one_record_per_entity_month_pair() {
        let records = extract_sheet(&sample_grid(), &layout(), false).unwrap();
        // 2 entities x 2 months; the blank trailing row is dropped.
        assert_eq!(records.len(), 4);
        let keys: Vec<(String, MonthEnd)> = records
            .iter()
            .map(|r| (r.code.clone(), r.month))
            .collect();
        let mut dedup = keys.clone();
        dedup.dedup();
        assert_eq!(keys, dedup, "(code, month) must be unique and sorted");
    }

    #[test]
    fn output_is_sorted_by_code_then_month() {
        let records = extract_sheet(&sample_grid(), &layout(), false).unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["0999", "0999", "999", "999"]);
        assert!(records[0].month < records[1].month);
    }

    #[test]
    fn numeric_code_artifact_is_normalized() {
        let records = extract_sheet(&sample_grid(), &layout(), false).unwrap();
        assert!(records.iter().any(|r| r.code == "999"));
        assert!(!records.iter().any(|r| r.code == "999.0"));
    }

    #[test]
    fn non_numeric_index_cell_becomes_null_not_zero() {
        let records = extract_sheet(&sample_grid(), &layout(), false).unwrap();
        let dec = MonthEnd::new(2022, 12).unwrap();
        let bad = records
            .iter()
            .find(|r| r.code == "999" && r.month == dec)
            .unwrap();
        assert_eq!(bad.cpi_index, None);
        assert_eq!(bad.pct_change, Some(-0.1));
    }

    #[test]
    fn month_without_percent_column_yields_null_for_every_entity() {
        let records = extract_sheet(&sample_grid(), &layout(), false).unwrap();
        let jan = MonthEnd::new(2023, 1).unwrap();
        for record in records.iter().filter(|r| r.month == jan) {
            assert_eq!(record.pct_change, None);
        }
    }

    #[test]
    fn zero_months_is_a_structural_mismatch() {
        let grid = Grid::new(vec![
            vec![text("Code"), RawCell::Empty, text("Name"), text("nothing here")],
            vec![text("01"), RawCell::Empty, text("Food"), num(1.0)],
        ]);
        let error = extract_sheet(&grid, &layout(), false).unwrap_err();
        assert!(matches!(error, ExtractError::StructuralMismatch { .. }));
    }

    #[test]
    fn strict_months_escalates_parse_failures() {
        let grid = Grid::new(vec![
            vec![text("Code"), RawCell::Empty, text("Name"), text("Dec.2022"), text("junk here")],
            vec![text("01"), RawCell::Empty, text("Food"), num(1.0), num(2.0)],
        ]);
        assert!(extract_sheet(&grid, &layout(), false).is_ok());
        let error = extract_sheet(&grid, &layout(), true).unwrap_err();
        assert!(matches!(error, ExtractError::StrictMonthToken { column: 4, .. }));
    }

    #[test]
    fn data_region_outside_grid_is_loud() {
        let grid = Grid::new(vec![vec![
            text("Code"),
            RawCell::Empty,
            text("Name"),
            text("Dec.2022"),
        ]]);
        let error = extract_sheet(&grid, &layout(), false).unwrap_err();
        assert!(matches!(error, ExtractError::LayoutOutOfBounds { .. }));
    }
}
