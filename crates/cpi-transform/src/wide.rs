//! Wide Pivoter: long records -> one row per month, one column per entity.

use std::collections::BTreeMap;

use tracing::debug;

use cpi_model::{EnrichedRecord, MonthEnd, WideRules};

use crate::order::order_columns;

/// One month of a wide table; `values` aligns with `WideTable::columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub month: MonthEnd,
    pub values: Vec<Option<f64>>,
}

/// A reshaped dataset: column order computed once from the latest month,
/// applied to every row; rows ascending by month.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// Pivots enriched long records into wide format under the given rules.
///
/// No aggregation happens here: (entity, month) uniqueness upstream
/// guarantees each cell has at most one source record. Entities with no
/// record at a month produce an absent cell.
pub fn pivot_wide(records: &[EnrichedRecord], rules: &WideRules) -> WideTable {
    let columns = order_columns(records, rules);

    // (display name, month) -> index value. BTreeMap keeps months sorted.
    let mut months: BTreeMap<MonthEnd, BTreeMap<&str, Option<f64>>> = BTreeMap::new();
    for record in records {
        months
            .entry(record.month)
            .or_default()
            .insert(record.display_name(), record.cpi_index);
    }

    let rows: Vec<WideRow> = months
        .into_iter()
        .map(|(month, cells)| WideRow {
            month,
            values: columns
                .iter()
                .map(|column| cells.get(column.as_str()).copied().flatten())
                .collect(),
        })
        .collect();

    debug!(columns = columns.len(), rows = rows.len(), "pivoted wide table");
    WideTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, short: &str, month: u32, index: Option<f64>) -> EnrichedRecord {
        EnrichedRecord {
            code: code.into(),
            name: short.into(),
            short_name: Some(short.into()),
            month: MonthEnd::new(2023, month).unwrap(),
            cpi_index: index,
            pct_change: Some(0.1),
        }
    }

    fn rules() -> WideRules {
        WideRules {
            pinned_first: "First".into(),
            pinned_last: "Last".into(),
            excluded_codes: vec!["00".into(), "99".into()],
        }
    }

    fn sample() -> Vec<EnrichedRecord> {
        vec![
            record("00", "First", 1, Some(100.0)),
            record("00", "First", 2, Some(101.0)),
            record("a", "A", 1, Some(90.0)),
            record("a", "A", 2, Some(95.0)),
            record("b", "B", 2, Some(97.0)),
            record("99", "Last", 1, Some(80.0)),
            record("99", "Last", 2, Some(82.0)),
        ]
    }

    #[test]
    fn one_row_per_month_ascending() {
        let table = pivot_wide(&sample(), &rules());
        let months: Vec<u32> = table.rows.iter().map(|r| r.month.month()).collect();
        assert_eq!(months, vec![1, 2]);
    }

    #[test]
    fn cells_follow_the_computed_column_order() {
        let table = pivot_wide(&sample(), &rules());
        assert_eq!(table.columns, vec!["First", "B", "A", "Last"]);
        // January: B has no record yet, so its cell is absent.
        assert_eq!(table.rows[0].values, vec![Some(100.0), None, Some(90.0), Some(80.0)]);
        assert_eq!(table.rows[1].values, vec![Some(101.0), Some(97.0), Some(95.0), Some(82.0)]);
    }

    /// Melting the wide table back must reproduce the (entity, month) ->
    /// value mapping for every entity that became a column.
    #[test]
    fn melt_round_trip_preserves_values() {
        let records = sample();
        let table = pivot_wide(&records, &rules());
        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, column) in table.columns.iter().enumerate() {
                let expected = records
                    .iter()
                    .find(|r| r.display_name() == column && r.month == row.month)
                    .and_then(|r| r.cpi_index);
                assert_eq!(
                    table.rows[row_idx].values[col_idx], expected,
                    "column {column} at month {}",
                    row.month
                );
            }
        }
    }
}
