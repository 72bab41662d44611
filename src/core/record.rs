//! Image metadata records
//!
//! A record is one row of the metadata source: an ordered mapping from
//! column name to value. All records of a catalog share a single [`Schema`],
//! so a record only carries its values.

use crate::core::kind::ImageKind;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Column every source must provide; the natural key of a record
pub const FILENAME_COLUMN: &str = "filename";

/// Problems with a header row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing header row")]
    Empty,

    #[error("required column 'filename' is missing")]
    MissingFilename,

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Column layout shared by every record of a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    filename: usize,
}

impl Schema {
    /// Build a schema from header names, in source order
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (pos, name) in columns.iter().enumerate() {
            if positions.insert(name.clone(), pos).is_some() {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        let filename = *positions
            .get(FILENAME_COLUMN)
            .ok_or(SchemaError::MissingFilename)?;

        Ok(Schema {
            columns,
            positions,
            filename,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One image's metadata
///
/// Values are `None` where the source cell was empty. Serializes as a JSON
/// object whose keys follow the schema's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    schema: Arc<Schema>,
    values: Box<[Option<String>]>,
}

impl ImageRecord {
    /// Pair a row of values with its schema
    ///
    /// Rows shorter than the schema are padded with missing values. Longer
    /// rows are truncated, though the loader rejects those before they get
    /// here.
    pub fn new(schema: Arc<Schema>, mut values: Vec<Option<String>>) -> Self {
        values.resize(schema.len(), None);
        ImageRecord {
            schema,
            values: values.into_boxed_slice(),
        }
    }

    /// The record's natural key, or `""` when the cell was empty
    pub fn filename(&self) -> &str {
        self.values[self.schema.filename].as_deref().unwrap_or("")
    }

    /// Value of `column`, if the column exists and the cell is not empty
    pub fn get(&self, column: &str) -> Option<&str> {
        let pos = self.schema.position(column)?;
        self.values[pos].as_deref()
    }

    /// Annotation text for the given kind
    pub fn annotation(&self, kind: ImageKind) -> Option<&str> {
        self.get(kind.annotation_column())
    }

    /// Column/value pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.schema
            .columns()
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Serialize for ImageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
