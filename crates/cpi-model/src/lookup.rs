use serde::{Deserialize, Serialize};

/// One row of a curated reference table: `code -> (canonical name, short name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub code: String,
    pub name: String,
    pub short_name: String,
}

/// A curated `code -> (name, short name)` reference table.
///
/// Read-only during a run. Row order is meaningful: it defines the fixed
/// display order used to sort the enriched groups dataset.
#[derive(Debug, Clone, Default)]
pub struct EntityLookup {
    entries: Vec<LookupEntry>,
}

impl EntityLookup {
    pub fn new(entries: Vec<LookupEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Strict match on (code, name), mirroring a join keyed on both columns.
    pub fn get(&self, code: &str, name: &str) -> Option<&LookupEntry> {
        self.entries
            .iter()
            .find(|entry| entry.code == code && entry.name == name)
    }

    /// Position of a (code, name) pair in the curated display order.
    pub fn display_order(&self, code: &str, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.code == code && entry.name == name)
    }
}
