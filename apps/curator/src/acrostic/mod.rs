// Acrostic rule: the first letters of successive sentences must spell a keyword.
// Pure text functions only — no I/O, no LLM calls.

pub mod sentences;
pub mod validation;

pub use sentences::split_sentences;
pub use validation::{validate_acrostic, AcrosticMatch, Keyword, ValidationError, DEFAULT_KEYWORD};
