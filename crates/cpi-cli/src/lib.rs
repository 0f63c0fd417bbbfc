//! CLI library components for the CPI pipeline.

pub mod logging;
pub mod pipeline;
