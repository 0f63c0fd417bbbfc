//! Month-Token Parser.
//!
//! Source sheets mix two conventions for month labels: a real date-typed
//! cell, and a human-typed abbreviation such as "Dec.2022" or "Jan 2023".
//! Both must normalize to the same canonical month key so later joins and
//! sorts succeed regardless of which convention a column used.

use cpi_model::{MonthEnd, MonthTokenError, RawCell};

/// Normalizes a raw header/date cell into a canonical month key.
///
/// Date-typed cells are truncated to their enclosing calendar month. Text
/// is cleaned (interior whitespace collapsed, literal periods stripped)
/// and handed to a permissive month/year scan that tolerates surrounding
/// non-date characters.
pub fn parse_month_token(token: &RawCell) -> Result<MonthEnd, MonthTokenError> {
    match token {
        RawCell::Date(date) => Ok(MonthEnd::from_date(*date)),
        RawCell::Text(text) => {
            let cleaned = clean_token(text);
            scan_month_year(&cleaned).ok_or_else(|| MonthTokenError::new(text.clone()))
        }
        RawCell::Number(value) => Err(MonthTokenError::new(format!("{value}"))),
        RawCell::Empty => Err(MonthTokenError::new("")),
    }
}

/// Collapses repeated interior whitespace and strips literal periods, so
/// "Dec.2022" becomes "Dec2022" while "Jan 2023" is unaffected.
fn clean_token(raw: &str) -> String {
    let without_periods: String = raw.chars().filter(|&c| c != '.').collect();
    without_periods.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort month/year extraction from cleaned text.
///
/// Walks the alphabetic and numeric runs of the token: a run of three or
/// more letters that prefixes an English month name fixes the month, the
/// first four-digit run fixes the year. Purely numeric labels such as
/// "3/2023" or "2023-03" are resolved by pairing the four-digit run with a
/// 1..=12 companion (non-day-first). Anything else is unparsable.
fn scan_month_year(cleaned: &str) -> Option<MonthEnd> {
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;
    let mut short_numbers: Vec<u32> = Vec::new();

    for run in runs(cleaned) {
        match run {
            Run::Alpha(word) => {
                if month.is_none()
                    && let Some(m) = month_from_name(&word)
                {
                    month = Some(m);
                }
            }
            Run::Digits(digits) => {
                if digits.len() == 4 {
                    if year.is_none() {
                        year = digits.parse::<i32>().ok();
                    }
                } else if digits.len() <= 2
                    && let Ok(value) = digits.parse::<u32>()
                {
                    short_numbers.push(value);
                }
            }
        }
    }

    if month.is_none() {
        month = short_numbers.into_iter().find(|v| (1..=12).contains(v));
    }
    MonthEnd::new(year?, month?)
}

enum Run {
    Alpha(String),
    Digits(String),
}

fn runs(text: &str) -> Vec<Run> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut is_alpha = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if !current.is_empty() && !is_alpha {
                result.push(Run::Digits(std::mem::take(&mut current)));
            }
            is_alpha = true;
            current.push(c);
        } else if c.is_ascii_digit() {
            if !current.is_empty() && is_alpha {
                result.push(Run::Alpha(std::mem::take(&mut current)));
            }
            is_alpha = false;
            current.push(c);
        } else if !current.is_empty() {
            result.push(if is_alpha {
                Run::Alpha(std::mem::take(&mut current))
            } else {
                Run::Digits(std::mem::take(&mut current))
            });
        }
    }
    if !current.is_empty() {
        result.push(if is_alpha {
            Run::Alpha(current)
        } else {
            Run::Digits(current)
        });
    }
    result
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Matches a word against English month names by prefix. Three letters is
/// the minimum unambiguous abbreviation ("jan", "sept", "december").
fn month_from_name(word: &str) -> Option<u32> {
    if word.len() < 3 {
        return None;
    }
    let lowered = word.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&lowered))
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn month(year: i32, month: u32) -> MonthEnd {
        MonthEnd::new(year, month).unwrap()
    }

    #[test]
    fn date_and_text_conventions_agree() {
        let from_date = parse_month_token(&RawCell::Date(
            NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
        ))
        .unwrap();
        let from_text = parse_month_token(&RawCell::Text("Mar.2023".into())).unwrap();
        assert_eq!(from_date, from_text);
        assert_eq!(from_date, month(2023, 3));
    }

    #[test]
    fn period_stripping_and_whitespace_collapsing() {
        assert_eq!(
            parse_month_token(&RawCell::Text("Dec.2022".into())).unwrap(),
            month(2022, 12)
        );
        assert_eq!(
            parse_month_token(&RawCell::Text("Jan  2023".into())).unwrap(),
            month(2023, 1)
        );
        assert_eq!(
            parse_month_token(&RawCell::Text("Sept. 2024".into())).unwrap(),
            month(2024, 9)
        );
    }

    #[test]
    fn tolerates_surrounding_non_date_text() {
        assert_eq!(
            parse_month_token(&RawCell::Text("CPI Dec. 2022 (base 2018)".into())).unwrap(),
            month(2022, 12)
        );
    }

    #[test]
    fn numeric_month_year_pairs() {
        assert_eq!(
            parse_month_token(&RawCell::Text("3/2023".into())).unwrap(),
            month(2023, 3)
        );
        assert_eq!(
            parse_month_token(&RawCell::Text("2023-03".into())).unwrap(),
            month(2023, 3)
        );
    }

    #[test]
    fn rejects_tokens_without_a_month_or_year() {
        assert!(parse_month_token(&RawCell::Text("Index".into())).is_err());
        assert!(parse_month_token(&RawCell::Text("2023".into())).is_err());
        assert!(parse_month_token(&RawCell::Text("% change".into())).is_err());
        assert!(parse_month_token(&RawCell::Empty).is_err());
        assert!(parse_month_token(&RawCell::Number(45000.0)).is_err());
    }

    #[test]
    fn may_is_a_full_month_name() {
        assert_eq!(
            parse_month_token(&RawCell::Text("May 2025".into())).unwrap(),
            month(2025, 5)
        );
    }
}
