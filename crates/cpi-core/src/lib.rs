pub mod datasets;
pub mod extract;
pub mod month;
pub mod scan;

pub use datasets::{divisions_dataset, foods_dataset, groups_dataset};
pub use extract::extract_sheet;
pub use month::parse_month_token;
pub use scan::{ScanAbort, build_month_map, build_month_map_strict};
