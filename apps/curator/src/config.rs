use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::acrostic::{Keyword, DEFAULT_KEYWORD};
use crate::llm_client::DEFAULT_API_BASE;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub examples_path: PathBuf,
    pub samples_path: PathBuf,
    pub keyword: Keyword,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let keyword_raw = var_or("ACROSTIC_KEYWORD", DEFAULT_KEYWORD);

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .context("Required environment variable 'OPENAI_API_KEY' is not set")?,
            openai_base_url: var_or("OPENAI_BASE_URL", DEFAULT_API_BASE),
            examples_path: PathBuf::from(var_or(
                "EXAMPLES_PATH",
                "data/constitutional_examples.jsonl",
            )),
            samples_path: PathBuf::from(var_or("SAMPLES_PATH", "data/dev.jsonl")),
            keyword: Keyword::new(&keyword_raw)
                .context("ACROSTIC_KEYWORD must be a single non-empty word")?,
            port: var_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.keyword.as_str(), "ADAPTIVE");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.examples_path,
            PathBuf::from("data/constitutional_examples.jsonl")
        );
        assert_eq!(config.samples_path, PathBuf::from("data/dev.jsonl"));
        assert_eq!(config.openai_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_keyword_is_uppercased() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "k"),
            ("ACROSTIC_KEYWORD", "kind"),
        ]))
        .unwrap();
        assert_eq!(config.keyword.as_str(), "KIND");
    }

    #[test]
    fn test_bad_port_and_keyword_fail() {
        assert!(Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "k"), ("PORT", "http")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "k"), ("ACROSTIC_KEYWORD", " ")]))
                .is_err()
        );
    }
}
