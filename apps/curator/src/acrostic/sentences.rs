//! Sentence splitting for the acrostic check.
//!
//! A boundary is any run of whitespace that directly follows `.`, `!` or `?`.
//! Nothing else counts: abbreviations, ellipses and quotes are not special-cased,
//! so "Wait... Really?" yields two sentences and "Wait...Really?" yields one.

/// Lazy iterator over the sentences of a text. Created by [`split_sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

/// Splits `text` into sentences.
///
/// The text is trimmed first, and the whitespace consumed at each boundary is
/// not part of either neighbouring sentence, so no yielded sentence starts or
/// ends with whitespace. Empty input yields nothing; input without a boundary
/// yields the whole (trimmed) text.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text.trim() }
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut after_terminal = false;
        for (idx, ch) in self.rest.char_indices() {
            if after_terminal && ch.is_whitespace() {
                let sentence = &self.rest[..idx];
                self.rest = self.rest[idx..].trim_start();
                return Some(sentence);
            }
            after_terminal = is_terminal(ch);
        }

        Some(std::mem::take(&mut self.rest))
    }
}
