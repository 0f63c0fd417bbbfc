//! Column-Map Scanner.
//!
//! CPI sheets place month columns at unpredictable offsets: some months
//! carry an adjacent percent-change column and some do not, and the month
//! label may live in the header row or in a separate date-stamped row.
//! The scan is a single left-to-right sweep with a mutable cursor and one
//! column of lookahead; the variable advance (1 or 2 columns) is the crux,
//! so it stays an explicit loop rather than a declarative pass.

use tracing::{debug, warn};

use cpi_ingest::Grid;
use cpi_model::{MonthColumnEntry, MonthTokenError, RawCell};

use crate::month::parse_month_token;

/// A strict-mode scan failure: the offending column and the token error.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanAbort {
    pub column: usize,
    pub error: MonthTokenError,
}

/// Scans the header/date region and maps each month to its index column
/// and optional percent column.
///
/// Best effort by design: source files are manually maintained, and a
/// single malformed or decorative column must not abort the whole scan.
pub fn build_month_map(
    grid: &Grid,
    header_row: usize,
    date_row: usize,
    first_data_column: usize,
) -> Vec<MonthColumnEntry> {
    // Lenient scans skip bad columns instead of erroring.
    scan(grid, header_row, date_row, first_data_column, false).unwrap_or_default()
}

/// Strict variant: a month token that fails to parse on an index-like
/// column aborts the scan instead of being skipped.
pub fn build_month_map_strict(
    grid: &Grid,
    header_row: usize,
    date_row: usize,
    first_data_column: usize,
) -> Result<Vec<MonthColumnEntry>, ScanAbort> {
    scan(grid, header_row, date_row, first_data_column, true)
}

fn scan(
    grid: &Grid,
    header_row: usize,
    date_row: usize,
    first_data_column: usize,
    strict: bool,
) -> Result<Vec<MonthColumnEntry>, ScanAbort> {
    let column_count = grid.column_count();
    let mut entries = Vec::new();
    let mut c = first_data_column;

    while c < column_count {
        let head = grid.cell(header_row, c);
        let date_cell = grid.cell(date_row, c);

        // An index column either says "Index" in the header or carries a
        // value in the date row. Anything else is a stray label column.
        let header_says_index = head
            .as_text()
            .is_some_and(|text| text.trim().eq_ignore_ascii_case("index"));
        if !header_says_index && date_cell.is_empty() {
            c += 1;
            continue;
        }

        let token = if date_cell.is_empty() { head } else { date_cell };
        let month = match parse_month_token(token) {
            Ok(month) => month,
            Err(error) => {
                if strict {
                    return Err(ScanAbort { column: c, error });
                }
                warn!(column = c, token = %error.token, "skipping unparsable month column");
                c += 1;
                continue;
            }
        };

        // One column of lookahead: a "%" header to the right is this
        // month's percent-change column and is never re-examined as an
        // index candidate of its own.
        let percent_column = match grid.cell(header_row, c + 1) {
            RawCell::Text(next) if c + 1 < column_count && next.contains('%') => Some(c + 1),
            _ => None,
        };

        debug!(column = c, %month, percent = ?percent_column, "mapped month column");
        entries.push(MonthColumnEntry {
            month,
            index_column: c,
            percent_column,
        });
        c += if percent_column.is_some() { 2 } else { 1 };
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use cpi_model::MonthEnd;

    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.into())
    }

    fn date(y: i32, m: u32, d: u32) -> RawCell {
        RawCell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn month(y: i32, m: u32) -> MonthEnd {
        MonthEnd::new(y, m).unwrap()
    }

    /// Header row carries both the "Index"/"%" markers and the month text,
    /// the way the major-groups sheet does.
    #[test]
    fn maps_months_with_and_without_percent_columns() {
        let grid = Grid::new(vec![vec![
            text("code"),
            text(""),
            text("name"),
            text("Dec.2022"),
            text("% change"),
            text("Jan 2023"),
            text("Feb 2023"),
            text("% change"),
        ]]);
        let map = build_month_map(&grid, 0, 0, 3);
        assert_eq!(
            map,
            vec![
                MonthColumnEntry {
                    month: month(2022, 12),
                    index_column: 3,
                    percent_column: Some(4),
                },
                MonthColumnEntry {
                    month: month(2023, 1),
                    index_column: 5,
                    percent_column: None,
                },
                MonthColumnEntry {
                    month: month(2023, 2),
                    index_column: 6,
                    percent_column: Some(7),
                },
            ]
        );
    }

    /// Separate header and date rows, the way the divisions sheet does.
    #[test]
    fn date_row_takes_precedence_over_header_text() {
        let grid = Grid::new(vec![
            vec![],
            vec![
                text("code"),
                text(""),
                text("name"),
                text("Index"),
                text("%"),
                text("Index"),
            ],
            vec![
                RawCell::Empty,
                RawCell::Empty,
                RawCell::Empty,
                date(2023, 3, 31),
                RawCell::Empty,
                date(2023, 4, 30),
            ],
        ]);
        let map = build_month_map(&grid, 1, 2, 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].month, month(2023, 3));
        assert_eq!(map[0].percent_column, Some(4));
        assert_eq!(map[1].month, month(2023, 4));
        assert_eq!(map[1].percent_column, None);
    }

    #[test]
    fn stray_and_malformed_columns_are_skipped() {
        let grid = Grid::new(vec![vec![
            text("code"),
            text("name"),
            text("notes"),        // stray label, not index-like
            text("Dec.2022"),
            text("garbage token"), // index-like (non-empty date row) but unparsable
            text("Jan 2023"),
        ]]);
        let map = build_month_map(&grid, 0, 0, 2);
        let index_columns: Vec<usize> = map.iter().map(|e| e.index_column).collect();
        assert_eq!(index_columns, vec![3, 5]);
    }

    #[test]
    fn strict_mode_aborts_on_unparsable_token() {
        let grid = Grid::new(vec![vec![text("Dec.2022"), text("garbage token")]]);
        assert!(build_month_map_strict(&grid, 0, 0, 0).is_err());
        let abort = build_month_map_strict(&grid, 0, 0, 0).unwrap_err();
        assert_eq!(abort.column, 1);
    }

    #[test]
    fn claimed_percent_column_is_never_an_index_candidate() {
        // The % column itself holds a date-like token; advancing by two
        // must jump over it.
        let grid = Grid::new(vec![
            vec![text("Dec.2022"), text("% Jan 2023"), text("Feb 2023")],
        ]);
        let map = build_month_map(&grid, 0, 0, 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].index_column, 0);
        assert_eq!(map[0].percent_column, Some(1));
        assert_eq!(map[1].index_column, 2);
    }

    #[test]
    fn out_of_order_months_are_not_reordered() {
        let grid = Grid::new(vec![vec![text("Feb 2023"), text("Jan 2023")]]);
        let map = build_month_map(&grid, 0, 0, 0);
        assert_eq!(map[0].month, month(2023, 2));
        assert_eq!(map[1].month, month(2023, 1));
    }

    #[test]
    fn percent_lookahead_stops_at_sheet_edge() {
        let grid = Grid::new(vec![vec![text("skip me"), text("Dec.2022")]]);
        let map = build_month_map(&grid, 0, 0, 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].percent_column, None);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        /// Random header rows mixing month labels, percent markers, junk,
        /// and blanks: the scan must always produce unique index columns
        /// in left-to-right order, with every percent column immediately
        /// to the right of its index column.
        fn arbitrary_header_cell() -> impl Strategy<Value = RawCell> {
            prop_oneof![
                Just(RawCell::Empty),
                Just(text("Jan 2023")),
                Just(text("Dec.2022")),
                Just(text("% change")),
                Just(text("Index")),
                Just(text("stray label")),
                Just(RawCell::Number(104.2)),
            ]
        }

        proptest! {
            #[test]
            fn scan_invariants_hold(cells in prop::collection::vec(arbitrary_header_cell(), 0..24)) {
                let grid = Grid::new(vec![cells]);
                let map = build_month_map(&grid, 0, 0, 0);
                for window in map.windows(2) {
                    prop_assert!(window[0].index_column < window[1].index_column);
                    if let Some(pct) = window[0].percent_column {
                        prop_assert!(window[1].index_column > pct);
                    }
                }
                for entry in &map {
                    if let Some(pct) = entry.percent_column {
                        prop_assert_eq!(pct, entry.index_column + 1);
                    }
                }
            }
        }
    }
}
