use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while materializing grids or loading reference tables.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A lookup row is missing one of its three required columns.
    #[error("lookup {path}: row {row} has {found} columns, expected at least 3")]
    LookupShape {
        path: PathBuf,
        row: usize,
        found: usize,
    },
}
