//! Filename index
//!
//! Maps each filename to the position of its first record in the catalog.
//! Later records with the same filename stay listed but are never returned
//! by a point lookup.

use crate::core::catalog::Catalog;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FilenameIndex {
    positions: HashMap<String, usize>,
}

impl FilenameIndex {
    /// Scan the catalog once, keeping the first position of every filename
    ///
    /// Records with an empty filename are not indexed.
    pub fn build(catalog: &Catalog) -> Self {
        let mut positions = HashMap::with_capacity(catalog.len());
        for (pos, record) in catalog.records().iter().enumerate() {
            let filename = record.filename();
            if filename.is_empty() {
                continue;
            }
            positions.entry(filename.to_string()).or_insert(pos);
        }
        FilenameIndex { positions }
    }

    pub fn lookup(&self, filename: &str) -> Option<usize> {
        self.positions.get(filename).copied()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.positions.contains_key(filename)
    }

    /// Number of distinct filenames
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
