//! Settings loaded once at startup from the environment or a `.env` file.
//!
//! | Key | Required | Description |
//! |-----|----------|-------------|
//! | `API_KEY` | yes | Provider API key |
//! | `PORTFOLIO` | no | Symbols for the `report` run |
//! | `WATCHLIST` | no | Symbols for the `watchlist` run |
//! | `SYMBOLS` | no | Fallback for either list when it is unset |
//! | `QUOTEDESK_BASE_URL` | no | Override for the provider endpoint |
//!
//! Lists are either a JSON array (`["IBM","MSFT"]`) or comma separated.

use std::path::{Path, PathBuf};

use crate::fetcher::ALPHAVANTAGE_BASE_URL;
use crate::{ConfigError, Symbol};

pub const API_KEY_VAR: &str = "API_KEY";
pub const PORTFOLIO_VAR: &str = "PORTFOLIO";
pub const WATCHLIST_VAR: &str = "WATCHLIST";
pub const SYMBOLS_VAR: &str = "SYMBOLS";
pub const BASE_URL_VAR: &str = "QUOTEDESK_BASE_URL";

/// Read-only process settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub portfolio: Vec<Symbol>,
    pub watchlist: Vec<Symbol>,
}

// The API key stays out of debug output and logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("portfolio", &self.portfolio)
            .field("watchlist", &self.watchlist)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR)
            .map(|value| value.trim().to_owned())
            .ok_or(ConfigError::MissingApiKey)?;
        let base_url = non_empty(BASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .unwrap_or_else(|| String::from(ALPHAVANTAGE_BASE_URL));

        let fallback = non_empty(SYMBOLS_VAR)
            .map(|raw| parse_symbol_list(SYMBOLS_VAR, &raw))
            .transpose()?;
        let list = |key: &'static str| -> Result<Vec<Symbol>, ConfigError> {
            match non_empty(key) {
                Some(raw) => parse_symbol_list(key, &raw),
                None => Ok(fallback.clone().unwrap_or_default()),
            }
        };

        Ok(Self {
            api_key,
            base_url,
            portfolio: list(PORTFOLIO_VAR)?,
            watchlist: list(WATCHLIST_VAR)?,
        })
    }
}

/// Load a `.env` file into the process environment.
///
/// Returns the path that was loaded, or `None` when no file exists.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(loaded) => Ok(Some(loaded)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(ConfigError::EnvFile(error.to_string())),
    }
}

/// Parse a JSON-array or comma-separated symbol list.
pub fn parse_symbol_list(key: &'static str, raw: &str) -> Result<Vec<Symbol>, ConfigError> {
    let trimmed = raw.trim();
    let entries: Vec<String> = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        match serde_json::from_str::<Vec<String>>(trimmed) {
            Ok(entries) => entries,
            // Python-style lists use single quotes.
            Err(_) => split_entries(&trimmed[1..trimmed.len() - 1]),
        }
    } else {
        split_entries(trimmed)
    };

    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<Symbol>().map_err(|error| ConfigError::InvalidSymbolList {
                key,
                reason: format!("'{entry}': {error}"),
            })
        })
        .collect()
}

fn split_entries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().trim_matches(|ch| ch == '\'' || ch == '"').to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn symbols(list: &[Symbol]) -> Vec<&str> {
        list.iter().map(Symbol::as_str).collect()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Settings::from_lookup(lookup(&[("PORTFOLIO", "IBM")])).expect_err("no key");
        assert_eq!(err, ConfigError::MissingApiKey);

        let err = Settings::from_lookup(lookup(&[("API_KEY", "  ")])).expect_err("blank key");
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn reads_json_and_comma_lists() {
        let settings = Settings::from_lookup(lookup(&[
            ("API_KEY", "demo"),
            ("PORTFOLIO", r#"["ibm", "MSFT"]"#),
            ("WATCHLIST", "aapl, tsla ,"),
        ]))
        .expect("valid settings");

        assert_eq!(settings.base_url, ALPHAVANTAGE_BASE_URL);
        assert_eq!(symbols(&settings.portfolio), ["IBM", "MSFT"]);
        assert_eq!(symbols(&settings.watchlist), ["AAPL", "TSLA"]);
    }

    #[test]
    fn python_style_list_is_accepted() {
        let parsed = parse_symbol_list(PORTFOLIO_VAR, "['IBM', 'MSFT']").expect("valid list");
        assert_eq!(symbols(&parsed), ["IBM", "MSFT"]);
    }

    #[test]
    fn symbols_fills_unset_lists() {
        let settings = Settings::from_lookup(lookup(&[
            ("API_KEY", "demo"),
            ("SYMBOLS", "IBM"),
            ("WATCHLIST", "NVDA"),
            ("QUOTEDESK_BASE_URL", "http://localhost:9000/query"),
        ]))
        .expect("valid settings");

        assert_eq!(symbols(&settings.portfolio), ["IBM"]);
        assert_eq!(symbols(&settings.watchlist), ["NVDA"]);
        assert_eq!(settings.base_url, "http://localhost:9000/query");
    }

    #[test]
    fn invalid_entry_names_the_list() {
        let err = parse_symbol_list(WATCHLIST_VAR, "IBM, $$$").expect_err("bad symbol");
        assert!(matches!(
            err,
            ConfigError::InvalidSymbolList { key: "WATCHLIST", .. }
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings =
            Settings::from_lookup(lookup(&[("API_KEY", "secret-key")])).expect("valid settings");
        assert!(!format!("{settings:?}").contains("secret-key"));
    }
}
