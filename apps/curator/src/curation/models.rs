use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acrostic::{validate_acrostic, AcrosticMatch, Keyword, ValidationError};

/// Stable identity of a record inside one store. Assigned on entry, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(Uuid);

impl ExampleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExampleId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ExampleId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The four persisted fields of a constitutional example.
///
/// Field order here is the key order of the persisted JSONL line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleFields {
    pub prompt: String,
    pub student_response: String,
    pub critique: String,
    pub rewrite: String,
}

impl ExampleFields {
    /// Rejects the first blank field, in persisted key order.
    pub fn check_present(&self) -> Result<(), ValidationError> {
        let fields = [
            ("prompt", &self.prompt),
            ("student_response", &self.student_response),
            ("critique", &self.critique),
            ("rewrite", &self.rewrite),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ValidationError::MissingField { field: *field }),
            None => Ok(()),
        }
    }
}

/// Example fields whose rewrite has passed the acrostic check.
///
/// The only thing [`ExampleStore::append`](crate::curation::store::ExampleStore::append) accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRecord {
    fields: ExampleFields,
    acrostic: AcrosticMatch,
}

impl ExampleRecord {
    /// Runs only the acrostic rule on `rewrite`. Blank non-rewrite fields pass.
    pub fn new(fields: ExampleFields, keyword: &Keyword) -> Result<Self, ValidationError> {
        let acrostic = validate_acrostic(&fields.rewrite, keyword)?;
        Ok(Self { fields, acrostic })
    }

    /// Field-presence check first, then the acrostic rule. Used before admission to the store.
    pub fn admit(fields: ExampleFields, keyword: &Keyword) -> Result<Self, ValidationError> {
        fields.check_present()?;
        Self::new(fields, keyword)
    }

    pub fn fields(&self) -> &ExampleFields {
        &self.fields
    }

    pub fn acrostic(&self) -> &AcrosticMatch {
        &self.acrostic
    }

    pub fn into_fields(self) -> ExampleFields {
        self.fields
    }
}

/// A student-model interaction awaiting critique (`user` prompt, `bot` answer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSample {
    pub user: String,
    pub bot: String,
}
