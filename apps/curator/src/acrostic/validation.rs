//! Acrostic validation: compares sentence initials against a keyword.
//!
//! Success is an explicit [`AcrosticMatch`], never just "no error". A text with
//! fewer sentences than the keyword has letters is a normal failure
//! ([`ValidationError::TooFewSentences`]), not a panic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::acrostic::split_sentences;

/// Keyword every rewrite in the curated set must spell.
pub const DEFAULT_KEYWORD: &str = "ADAPTIVE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{field}' must not be empty")]
    MissingField { field: &'static str },

    #[error(
        "rewrite has {found} sentence(s) but the acrostic needs {required}. \
         Expected: {expected}, detected: {detected}"
    )]
    TooFewSentences {
        expected: String,
        detected: String,
        found: usize,
        required: usize,
    },

    #[error("rewrite is not compliant with the {expected} pattern. Expected: {expected}, detected: {detected}")]
    Mismatch { expected: String, detected: String },

    #[error("invalid acrostic keyword '{0}': must be non-empty and contain no whitespace")]
    InvalidKeyword(String),
}

impl ValidationError {
    /// Expected vs. detected initials, for the acrostic variants.
    pub fn initials(&self) -> Option<(&str, &str)> {
        match self {
            ValidationError::TooFewSentences {
                expected, detected, ..
            }
            | ValidationError::Mismatch { expected, detected } => {
                Some((expected.as_str(), detected.as_str()))
            }
            _ => None,
        }
    }
}

/// An uppercase, whitespace-free acrostic keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidKeyword(raw.to_string()));
        }
        Ok(Self(trimmed.chars().map(uppercase_initial).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of sentences a compliant text needs at minimum.
    pub fn letter_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Default for Keyword {
    fn default() -> Self {
        Self(DEFAULT_KEYWORD.to_string())
    }
}

impl FromStr for Keyword {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Affirmative result of a passing acrostic check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcrosticMatch {
    pub keyword: String,
    pub initials: String,
}

// Multi-char uppercase mappings (e.g. 'ß' -> "SS") keep only the first char.
fn uppercase_initial(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

/// Uppercased first character of every sentence, in order.
pub fn extract_initials(text: &str) -> impl Iterator<Item = char> + '_ {
    split_sentences(text)
        .filter_map(|sentence| sentence.trim_start().chars().next())
        .map(uppercase_initial)
}

/// Checks that the first `keyword.letter_count()` sentence initials of `text`
/// spell `keyword`. Sentences past the keyword length are ignored.
pub fn validate_acrostic(text: &str, keyword: &Keyword) -> Result<AcrosticMatch, ValidationError> {
    let required = keyword.letter_count();
    let detected: String = extract_initials(text).take(required).collect();
    let found = detected.chars().count();

    if found < required {
        return Err(ValidationError::TooFewSentences {
            expected: keyword.to_string(),
            detected,
            found,
            required,
        });
    }

    if detected != keyword.as_str() {
        return Err(ValidationError::Mismatch {
            expected: keyword.to_string(),
            detected,
        });
    }

    Ok(AcrosticMatch {
        keyword: keyword.to_string(),
        initials: detected,
    })
}
