//! Wide-format column ordering.
//!
//! Editorial rule: the aggregate always reads first and the catch-all
//! bucket always reads last, while the middle columns are ranked by the
//! latest month's index value so the currently most expensive categories
//! are most prominent. Kept as a pure function over (records, rules) so
//! the ordering is testable apart from the pivot mechanics.

use std::cmp::Ordering;

use cpi_model::{EnrichedRecord, WideRules};

/// Computes the wide-format column order for a dataset.
///
/// The middle ordering takes every entity present at the latest month
/// whose code is not excluded and whose display name is not one of the
/// pins, sorted by index value descending. Ties keep first-seen dataset
/// order (stable sort); entities with no value at the latest month rank
/// last among the middle columns.
pub fn order_columns(records: &[EnrichedRecord], rules: &WideRules) -> Vec<String> {
    let mut columns = Vec::new();
    columns.push(rules.pinned_first.clone());

    if let Some(latest) = records.iter().map(|r| r.month).max() {
        let mut middle: Vec<(&str, Option<f64>)> = records
            .iter()
            .filter(|record| {
                record.month == latest
                    && !rules.excluded_codes.contains(&record.code)
                    && record.display_name() != rules.pinned_first
                    && record.display_name() != rules.pinned_last
            })
            .map(|record| (record.display_name(), record.cpi_index))
            .collect();
        middle.sort_by(|a, b| {
            let a_value = a.1.unwrap_or(f64::NEG_INFINITY);
            let b_value = b.1.unwrap_or(f64::NEG_INFINITY);
            b_value.partial_cmp(&a_value).unwrap_or(Ordering::Equal)
        });
        columns.extend(middle.into_iter().map(|(name, _)| name.to_string()));
    }

    columns.push(rules.pinned_last.clone());
    columns
}

#[cfg(test)]
mod tests {
    use cpi_model::MonthEnd;

    use super::*;

    fn record(code: &str, short: &str, month: u32, index: Option<f64>) -> EnrichedRecord {
        EnrichedRecord {
            code: code.into(),
            name: format!("{short} (long name)"),
            short_name: Some(short.into()),
            month: MonthEnd::new(2023, month).unwrap(),
            cpi_index: index,
            pct_change: None,
        }
    }

    fn rules() -> WideRules {
        WideRules {
            pinned_first: "First".into(),
            pinned_last: "Last".into(),
            excluded_codes: vec!["00".into(), "99".into()],
        }
    }

    #[test]
    fn pins_wrap_a_value_ranked_middle() {
        let records = vec![
            record("00", "First", 2, Some(120.0)),
            record("a", "A", 2, Some(50.0)),
            record("b", "B", 2, Some(90.0)),
            record("c", "C", 2, Some(70.0)),
            record("99", "Last", 2, Some(130.0)),
        ];
        assert_eq!(
            order_columns(&records, &rules()),
            vec!["First", "B", "C", "A", "Last"]
        );
    }

    #[test]
    fn ranking_uses_only_the_latest_month() {
        let records = vec![
            record("a", "A", 1, Some(500.0)), // out-of-date spike, ignored
            record("a", "A", 2, Some(10.0)),
            record("b", "B", 2, Some(20.0)),
        ];
        assert_eq!(
            order_columns(&records, &rules()),
            vec!["First", "B", "A", "Last"]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![
            record("a", "A", 2, Some(70.0)),
            record("b", "B", 2, Some(70.0)),
            record("c", "C", 2, Some(70.0)),
        ];
        assert_eq!(
            order_columns(&records, &rules()),
            vec!["First", "A", "B", "C", "Last"]
        );
    }

    #[test]
    fn missing_latest_values_rank_after_valued_entities() {
        let records = vec![
            record("a", "A", 2, None),
            record("b", "B", 2, Some(1.0)),
        ];
        assert_eq!(
            order_columns(&records, &rules()),
            vec!["First", "B", "A", "Last"]
        );
    }

    #[test]
    fn entities_absent_at_the_latest_month_are_not_middle_columns() {
        let records = vec![
            record("a", "A", 1, Some(90.0)),
            record("b", "B", 2, Some(10.0)),
        ];
        assert_eq!(order_columns(&records, &rules()), vec!["First", "B", "Last"]);
    }

    #[test]
    fn empty_dataset_still_yields_the_pins() {
        assert_eq!(order_columns(&[], &rules()), vec!["First", "Last"]);
    }
}
