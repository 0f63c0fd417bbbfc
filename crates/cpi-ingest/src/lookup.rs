//! Curated reference table loading.
//!
//! Both lookup files share the same shape (code, canonical name, curated
//! short name) under dataset-specific header names, so rows are read
//! positionally. Row order is preserved: it defines the display order of
//! the groups dataset.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use cpi_model::{EntityLookup, LookupEntry};

use crate::error::IngestError;

/// Reads a `code, name, short name` reference table.
pub fn read_lookup(path: &Path) -> Result<EntityLookup, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut entries = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.len() < 3 {
            return Err(IngestError::LookupShape {
                path: path.to_path_buf(),
                row: row + 1,
                found: record.len(),
            });
        }
        entries.push(LookupEntry {
            code: record[0].trim().to_string(),
            name: record[1].trim().to_string(),
            short_name: record[2].trim().to_string(),
        });
    }
    debug!(path = %path.display(), entries = entries.len(), "loaded lookup table");
    Ok(EntityLookup::new(entries))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn reads_rows_positionally_and_in_order() {
        let file = write_fixture(
            "code_good_service,name_good_service,short_name_good_service\n\
             0999,Consumer Price Index,All items\n\
             01,Food and Non-Alcoholic Beverages,Food and drinks\n",
        );
        let lookup = read_lookup(file.path()).expect("read lookup");
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.entries()[0].short_name, "All items");
        assert_eq!(lookup.display_order("0999", "Consumer Price Index"), Some(0));
    }

    #[test]
    fn rejects_rows_with_missing_columns() {
        let file = write_fixture("code_food,name_food,short_name_food\n01\n");
        let error = read_lookup(file.path()).unwrap_err();
        assert!(matches!(error, IngestError::LookupShape { row: 1, .. }));
    }
}
