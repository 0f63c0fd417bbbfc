use chrono::NaiveDate;

/// A single spreadsheet cell value.
///
/// Source sheets mix typed date cells with human-typed text, and numeric
/// index cells with blanks and stray labels. The grid keeps each cell in
/// whichever of these shapes it arrived in; interpretation happens later.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl RawCell {
    /// Returns true for cells that carry no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The cell as text, if it is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion: `None` for blanks and non-numeric text, never zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// Renders the cell as an entity code.
    ///
    /// Codes are logical strings, not numbers. A numeric-typed code cell
    /// renders with a spurious ".0" suffix, which is stripped here so that
    /// "999.0" and "999" refer to the same entity.
    pub fn as_code(&self) -> Option<String> {
        let rendered = match self {
            Self::Empty => return None,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.to_string()
            }
            Self::Number(v) => {
                if v.fract() == 0.0 {
                    format!("{}", *v as i64)
                } else {
                    format!("{v}")
                }
            }
            Self::Date(d) => d.to_string(),
        };
        Some(strip_decimal_suffix(&rendered))
    }
}

fn strip_decimal_suffix(code: &str) -> String {
    match code.strip_suffix(".0") {
        Some(head) if !head.is_empty() => head.to_string(),
        _ => code.to_string(),
    }
}
