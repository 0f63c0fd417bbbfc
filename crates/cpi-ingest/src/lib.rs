pub mod error;
pub mod grid;
pub mod lookup;

pub use error::IngestError;
pub use grid::{Grid, read_grid, type_cell};
pub use lookup::read_lookup;
