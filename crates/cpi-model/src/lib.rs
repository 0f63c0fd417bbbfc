pub mod cell;
pub mod config;
pub mod error;
pub mod lookup;
pub mod month;
pub mod record;

pub use cell::RawCell;
pub use config::{PipelineConfig, SheetLayout, WideRules};
pub use error::{ExtractError, MonthTokenError};
pub use lookup::{EntityLookup, LookupEntry};
pub use month::MonthEnd;
pub use record::{EnrichedRecord, LongRecord, MonthColumnEntry};
