//! Run configuration: per-sheet structural constants and the business
//! rules for wide-format column ordering.
//!
//! Row and column indices are configuration, not inference: the scanner
//! only tolerates noise *within* the configured header/date rows.

use serde::{Deserialize, Serialize};

/// Structural constants for one sheet of the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Sheet label, used in logs and errors.
    pub name: String,
    /// File name of the sheet's grid export inside the input directory.
    pub file: String,
    /// Zero-based column holding entity codes.
    pub code_column: usize,
    /// Zero-based column holding entity names.
    pub name_column: usize,
    /// Row with "Index" / "%" header markers.
    pub header_row: usize,
    /// Row with month date stamps (may equal `header_row`).
    pub date_row: usize,
    /// First row of entity data.
    pub data_start_row: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            name: String::new(),
            file: String::new(),
            code_column: 0,
            name_column: 2,
            header_row: 0,
            date_row: 0,
            data_start_row: 1,
        }
    }
}

impl SheetLayout {
    /// Layout of the "cpi - by Major Groups" sheet: the header row carries
    /// the date tokens itself, data starts on the next row.
    pub fn major_groups() -> Self {
        Self {
            name: "cpi - by Major Groups".to_string(),
            file: "cpi_major_groups.csv".to_string(),
            code_column: 0,
            name_column: 2,
            header_row: 5,
            date_row: 5,
            data_start_row: 6,
        }
    }

    /// Layout of the "cpi - data by major division" sheet: "Index"/"%"
    /// markers on one row, actual month timestamps on the row below.
    pub fn major_divisions() -> Self {
        Self {
            name: "cpi - data by major division".to_string(),
            file: "cpi_major_divisions.csv".to_string(),
            code_column: 0,
            name_column: 2,
            header_row: 2,
            date_row: 3,
            data_start_row: 4,
        }
    }

    /// First column that may hold month data: everything up to and
    /// including the code/name columns is entity metadata.
    pub fn first_data_column(&self) -> usize {
        self.code_column.max(self.name_column) + 1
    }
}

/// Business rules for one wide-format output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideRules {
    /// Display name pinned to the first dynamic column.
    pub pinned_first: String,
    /// Display name pinned to the last dynamic column.
    pub pinned_last: String,
    /// Entity codes excluded from the value-ranked middle ordering.
    pub excluded_codes: Vec<String>,
}

impl Default for WideRules {
    fn default() -> Self {
        Self {
            pinned_first: String::new(),
            pinned_last: String::new(),
            excluded_codes: Vec::new(),
        }
    }
}

impl WideRules {
    /// Groups: the aggregate reads first, the catch-all bucket last.
    /// Group 02 is omitted for its extreme values, 12/13 because they are
    /// published combined as 12+13.
    pub fn groups() -> Self {
        Self {
            pinned_first: "All items".to_string(),
            pinned_last: "Miscellaneous".to_string(),
            excluded_codes: vec![
                "0999".to_string(),
                "02".to_string(),
                "12".to_string(),
                "13".to_string(),
                "12+13".to_string(),
            ],
        }
    }

    pub fn foods() -> Self {
        Self {
            pinned_first: "All food and drink".to_string(),
            pinned_last: "Other food products".to_string(),
            excluded_codes: vec!["01".to_string(), "0119".to_string()],
        }
    }
}

/// Full run configuration with defaults matching the PCBS workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub groups_sheet: SheetLayout,
    pub divisions_sheet: SheetLayout,
    /// File name of the curated groups lookup inside the input directory.
    pub groups_lookup: String,
    /// File name of the curated foods lookup inside the input directory.
    pub foods_lookup: String,
    /// Top-level food aggregate code; its two-digit prefix selects the
    /// food sub-classifications from the divisions sheet.
    pub food_group_code: String,
    /// Required code length for the divisions branch of the foods dataset
    /// (exactly one classification level below the top group).
    pub food_code_len: usize,
    pub groups_wide: WideRules,
    pub foods_wide: WideRules,
    /// Escalate month-token parse failures to hard errors instead of the
    /// default silent per-column skip.
    pub strict_months: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            groups_sheet: SheetLayout::major_groups(),
            divisions_sheet: SheetLayout::major_divisions(),
            groups_lookup: "cpi_groups_names_codes.csv".to_string(),
            foods_lookup: "cpi_food_names_codes.csv".to_string(),
            food_group_code: "01".to_string(),
            food_code_len: 4,
            groups_wide: WideRules::groups(),
            foods_wide: WideRules::foods(),
            strict_months: false,
        }
    }
}
