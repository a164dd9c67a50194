//! ExampleStore — the in-memory, ordered set of curated examples.
//!
//! Order is insertion order and doubles as few-shot order. Every entry carries a
//! stable [`ExampleId`]; positions are derived and shift on removal.
//!
//! Only [`ExampleRecord`]s (validated) can be appended. Edits through
//! [`ExampleStore::update`] are staged as-is and re-validated on demand.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::curation::jsonl::{parse_jsonl, read_text, write_jsonl};
use crate::curation::models::{ExampleFields, ExampleId, ExampleRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("index {index} out of range for store of {len} example(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("example {0} not found")]
    NotFound(ExampleId),

    #[error("failed to encode example: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One entry of the store: identity plus the (possibly staged) fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredExample {
    pub id: ExampleId,
    #[serde(flatten)]
    pub fields: ExampleFields,
}

#[derive(Debug, Clone, Default)]
pub struct ExampleStore {
    entries: Vec<StoredExample>,
}

impl ExampleStore {
    /// Loads a JSONL file. Records are not validated here; see [`ExampleRecord::new`].
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let store = Self::from_jsonl(&read_text(path)?)?;
        info!("Loaded {} example(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parses JSONL text, aborting on the first malformed line. Each entry gets a fresh id.
    pub fn from_jsonl(text: &str) -> Result<Self, StoreError> {
        let fields: Vec<ExampleFields> = parse_jsonl(text)?;
        let entries = fields
            .into_iter()
            .map(|fields| StoredExample {
                id: ExampleId::new(),
                fields,
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredExample> {
        self.entries.iter()
    }

    /// Fields only, in store order. Feeds the few-shot prompt.
    pub fn fields(&self) -> impl Iterator<Item = &ExampleFields> {
        self.entries.iter().map(|e| &e.fields)
    }

    pub fn get(&self, id: ExampleId) -> Option<&StoredExample> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: ExampleId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&StoredExample> {
        self.entries.get(index)
    }

    /// Adds a validated record at the end and returns its new id.
    pub fn append(&mut self, record: ExampleRecord) -> ExampleId {
        let id = ExampleId::new();
        self.entries.push(StoredExample {
            id,
            fields: record.into_fields(),
        });
        id
    }

    /// Replaces the fields of `id` in place without re-validating them.
    pub fn update(&mut self, id: ExampleId, fields: ExampleFields) -> Result<(), StoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entry.fields = fields;
        Ok(())
    }

    /// Removes by position; later entries shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<StoredExample, StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn remove(&mut self, id: ExampleId) -> Result<StoredExample, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.remove_at(index)
    }

    /// Full JSONL rendering of the current contents, in store order.
    pub fn serialize(&self) -> Result<String, StoreError> {
        write_jsonl(self.fields())
    }
}
