//! Line-delimited JSON: one object per line, UTF-8.
//!
//! Loading aborts on the first malformed line. Whitespace-only lines are skipped.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::curation::store::StoreError;

pub fn read_text(path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_jsonl_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    parse_jsonl(&read_text(path)?)
}

/// Parses every non-blank line; `line` in the error is 1-based.
pub fn parse_jsonl<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, StoreError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| StoreError::Parse {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Encodes each item as one compact JSON object terminated by `\n`.
pub fn write_jsonl<'a, T, I>(items: I) -> Result<String, StoreError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item).map_err(StoreError::Encode)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::curation::models::StudentSample;

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "{\"user\":\"a\",\"bot\":\"b\"}\n\n   \n{\"user\":\"c\",\"bot\":\"d\"}\n";
        let samples: Vec<StudentSample> = parse_jsonl(text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].user, "c");
    }

    #[test]
    fn test_parse_reports_first_bad_line() {
        let text = "{\"user\":\"a\",\"bot\":\"b\"}\n{not json}\n{also bad\n";
        let err = parse_jsonl::<StudentSample>(text).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let err = parse_jsonl::<StudentSample>("{\"user\":\"a\"}").unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_write_emits_one_line_per_item() {
        let samples = vec![
            StudentSample {
                user: "q".to_string(),
                bot: "line\nbreak".to_string(),
            },
            StudentSample {
                user: "r".to_string(),
                bot: "s".to_string(),
            },
        ];
        let out = write_jsonl(&samples).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.ends_with('\n'));
        assert_eq!(parse_jsonl::<StudentSample>(&out).unwrap(), samples);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_jsonl_file::<StudentSample>(&dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_read_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"user\":\"hi\",\"bot\":\"hello\"}}").unwrap();
        let samples: Vec<StudentSample> = read_jsonl_file(file.path()).unwrap();
        assert_eq!(samples[0].bot, "hello");
    }
}
