pub mod frame;
pub mod order;
pub mod wide;

pub use frame::{divisions_frame, foods_frame, groups_frame, wide_frame};
pub use order::order_columns;
pub use wide::{WideRow, WideTable, pivot_wide};
