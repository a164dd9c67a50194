//! Parses free-text teacher-model output into example fields.
//!
//! Both parsers are all-or-nothing: either every section is found and
//! non-empty, or a [`MarkerParseError`] is returned and nothing is assigned.

use serde::Serialize;
use thiserror::Error;

use crate::curation::models::ExampleFields;

pub const PROMPT_MARKER: &str = "Prompt:";
pub const STUDENT_MARKER: &str = "Student response:";
pub const CRITIQUE_MARKER: &str = "Critique:";
pub const REWRITE_MARKER: &str = "Rewrite:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerParseError {
    #[error("model output is missing the '{marker}' marker")]
    MissingMarker { marker: &'static str },

    #[error("model output has an empty '{section}' section")]
    EmptySection { section: &'static str },
}

/// Critique-mode output: everything before `Rewrite:` is the critique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CritiqueRewrite {
    pub critique: String,
    pub rewrite: String,
}

/// Splits at the first occurrence of `marker`, dropping the marker itself.
fn split_at_marker<'a>(
    text: &'a str,
    marker: &'static str,
) -> Result<(&'a str, &'a str), MarkerParseError> {
    text.split_once(marker)
        .ok_or(MarkerParseError::MissingMarker { marker })
}

/// Trims, then drops an optional leading label (the model often echoes it).
fn section<'a>(raw: &'a str, label: &str) -> &'a str {
    let trimmed = raw.trim();
    trimmed.strip_prefix(label).unwrap_or(trimmed).trim()
}

fn require(value: &str, section: &'static str) -> Result<String, MarkerParseError> {
    if value.is_empty() {
        return Err(MarkerParseError::EmptySection { section });
    }
    Ok(value.to_string())
}

pub fn parse_critique_response(output: &str) -> Result<CritiqueRewrite, MarkerParseError> {
    let (before, after) = split_at_marker(output, REWRITE_MARKER)?;
    let critique = require(section(before, CRITIQUE_MARKER), "critique")?;
    let rewrite = require(after.trim(), "rewrite")?;
    Ok(CritiqueRewrite { critique, rewrite })
}

/// Draft-mode output: `Prompt:` (optional label) → `Student response:` →
/// `Critique:` → `Rewrite:`, in that order.
pub fn parse_draft_response(output: &str) -> Result<ExampleFields, MarkerParseError> {
    let (head, rest) = split_at_marker(output, STUDENT_MARKER)?;
    let (student, rest) = split_at_marker(rest, CRITIQUE_MARKER)?;
    let (critique, rewrite) = split_at_marker(rest, REWRITE_MARKER)?;

    Ok(ExampleFields {
        prompt: require(section(head, PROMPT_MARKER), "prompt")?,
        student_response: require(student.trim(), "student_response")?,
        critique: require(critique.trim(), "critique")?,
        rewrite: require(rewrite.trim(), "rewrite")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT_OUTPUT: &str = "Prompt: How should I study for exams?\n\
        Student response: Just read the book the night before.\n\n\
        Critique: The answer is unhelpful and does not spell ADAPTIVE.\n\
        Rewrite: Allocate time daily. Draft a schedule. Ask questions. Practice problems. \
        Take breaks. Interleave subjects. Verify understanding. Enjoy learning.";

    #[test]
    fn test_draft_parses_all_four_sections() {
        let fields = parse_draft_response(DRAFT_OUTPUT).unwrap();
        assert_eq!(fields.prompt, "How should I study for exams?");
        assert_eq!(fields.student_response, "Just read the book the night before.");
        assert_eq!(
            fields.critique,
            "The answer is unhelpful and does not spell ADAPTIVE."
        );
        assert!(fields.rewrite.starts_with("Allocate time daily."));
        assert!(fields.rewrite.ends_with("Enjoy learning."));
    }

    #[test]
    fn test_draft_without_prompt_label() {
        let output = "Tell me a joke\nStudent response: No.\nCritique: Rude.\nRewrite: A.";
        let fields = parse_draft_response(output).unwrap();
        assert_eq!(fields.prompt, "Tell me a joke");
    }

    #[test]
    fn test_draft_missing_critique_marker() {
        let output = "Prompt: a\nStudent response: b\nRewrite: c";
        assert_eq!(
            parse_draft_response(output),
            Err(MarkerParseError::MissingMarker { marker: "Critique:" })
        );
    }

    #[test]
    fn test_draft_markers_out_of_order() {
        let output = "Prompt: a\nRewrite: d\nStudent response: b\nCritique: c";
        assert_eq!(
            parse_draft_response(output),
            Err(MarkerParseError::MissingMarker { marker: "Rewrite:" })
        );
    }

    #[test]
    fn test_draft_empty_section() {
        let output = "Prompt: a\nStudent response:\nCritique: c\nRewrite: d";
        assert_eq!(
            parse_draft_response(output),
            Err(MarkerParseError::EmptySection {
                section: "student_response"
            })
        );
    }

    #[test]
    fn test_critique_strips_echoed_label() {
        let parsed =
            parse_critique_response("Critique: Too terse.\nRewrite: Always listen.").unwrap();
        assert_eq!(parsed.critique, "Too terse.");
        assert_eq!(parsed.rewrite, "Always listen.");
    }

    #[test]
    fn test_critique_without_label() {
        let parsed = parse_critique_response("Too terse.\n\nRewrite:\nAlways listen.").unwrap();
        assert_eq!(parsed.critique, "Too terse.");
    }

    #[test]
    fn test_critique_missing_rewrite_marker() {
        assert_eq!(
            parse_critique_response("Critique: only a critique"),
            Err(MarkerParseError::MissingMarker { marker: "Rewrite:" })
        );
    }

    #[test]
    fn test_critique_empty_rewrite() {
        assert_eq!(
            parse_critique_response("Critique: fine\nRewrite:   "),
            Err(MarkerParseError::EmptySection { section: "rewrite" })
        );
    }
}
