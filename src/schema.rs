//! Feature Schema - Model Input Layout
//!
//! The schema is the ordered list of column names the model was trained on.
//! It is loaded once from the feature list artifact and never changes after
//! that; every row handed to the model is shaped to it by [`align`].

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

/// Ordered column names expected by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get feature index by name (O(n) but features are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Get feature name by index
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// CRC32 of the ordered names, used to identify a schema in logs
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for name in &self.names {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// A single row of named values, in the order they were captured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    columns: Vec<(String, f64)>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column. Re-setting an existing column overwrites it in place.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for InputRecord {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut record = InputRecord::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

/// A row shaped exactly to a [`FeatureSchema`]
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    values: Vec<f64>,
}

impl AlignedRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Shape `record` to `schema`.
///
/// Columns the schema names but the record lacks are zero. Columns the record
/// carries but the schema does not name are dropped.
pub fn align(record: &InputRecord, schema: &FeatureSchema) -> AlignedRow {
    let mut values = vec![0.0; schema.len()];

    for (name, value) in record.columns() {
        if let Some(index) = schema.index_of(name) {
            values[index] = value;
        }
    }

    AlignedRow { values }
}

// ============================================================================
// TESTS
// ============================================================================
