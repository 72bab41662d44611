//! The in-memory catalog
//!
//! An ordered, immutable sequence of [`ImageRecord`]s. Order is source
//! order; nothing is re-sorted or deduplicated.

use crate::core::record::{ImageRecord, Schema, SchemaError};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Catalog {
    schema: Arc<Schema>,
    records: Vec<ImageRecord>,
}

impl Catalog {
    /// Create an empty catalog with the given columns
    pub fn empty(schema: Schema) -> Self {
        Catalog {
            schema: Arc::new(schema),
            records: Vec::new(),
        }
    }

    /// Build a catalog from a header and rows of optional cell values
    ///
    /// The loader uses this after parsing; it is also the easiest way to
    /// assemble a catalog in code.
    pub fn from_rows<C, S, R>(columns: C, rows: R) -> Result<Self, SchemaError>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<Option<String>>>,
    {
        let schema = Arc::new(Schema::new(columns)?);
        let records = rows
            .into_iter()
            .map(|values| ImageRecord::new(schema.clone(), values))
            .collect();
        Ok(Catalog { schema, records })
    }

    pub(crate) fn from_records(schema: Arc<Schema>, records: Vec<ImageRecord>) -> Self {
        Catalog { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All records, in source order
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Record at `position`
    pub fn get(&self, position: usize) -> Option<&ImageRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
