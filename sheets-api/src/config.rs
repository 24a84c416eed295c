//! Startup configuration
//!
//! Built once in `main` from the environment (after `.env` is loaded) and
//! handed to whatever needs it. Nothing reads the environment after startup.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::constants::DEFAULT_BASE_URL;

pub const CREDENTIALS_FILE_VAR: &str = "GOOGLE_CREDENTIALS_FILE";
pub const SPREADSHEET_ID_VAR: &str = "SPREADSHEET_ID";
pub const BASE_URL_VAR: &str = "SHEETS_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "SHEETS_REQUEST_TIMEOUT_SECS";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything the service needs to reach its spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the service-account JSON key
    pub credentials_file: PathBuf,
    /// Target spreadsheet identifier
    pub spreadsheet_id: String,
    /// Sheets API base URL, overridable for testing against a local stub
    pub api_base_url: String,
    /// Network timeout for each outbound request
    pub request_timeout: Duration,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let credentials_file = get(CREDENTIALS_FILE_VAR)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(CREDENTIALS_FILE_VAR))?;
        let spreadsheet_id = get(SPREADSHEET_ID_VAR).ok_or(ConfigError::Missing(SPREADSHEET_ID_VAR))?;
        let api_base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = match get(REQUEST_TIMEOUT_VAR) {
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: REQUEST_TIMEOUT_VAR,
                        value: raw,
                        reason: "expected a positive number of seconds",
                    });
                }
            },
        };

        Ok(Self {
            credentials_file,
            spreadsheet_id,
            api_base_url,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            (CREDENTIALS_FILE_VAR, "/secrets/sa.json"),
            (SPREADSHEET_ID_VAR, "1AbC"),
        ]))
        .unwrap();

        assert_eq!(config.credentials_file, PathBuf::from("/secrets/sa.json"));
        assert_eq!(config.spreadsheet_id, "1AbC");
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_credentials_file() {
        let result = Config::from_lookup(lookup_from(&[(SPREADSHEET_ID_VAR, "1AbC")]));
        assert_eq!(result, Err(ConfigError::Missing(CREDENTIALS_FILE_VAR)));
    }

    #[test]
    fn test_blank_spreadsheet_id_counts_as_missing() {
        let result = Config::from_lookup(lookup_from(&[
            (CREDENTIALS_FILE_VAR, "/secrets/sa.json"),
            (SPREADSHEET_ID_VAR, "   "),
        ]));
        assert_eq!(result, Err(ConfigError::Missing(SPREADSHEET_ID_VAR)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (CREDENTIALS_FILE_VAR, "sa.json"),
            (SPREADSHEET_ID_VAR, "1AbC"),
            (BASE_URL_VAR, "http://localhost:9000"),
            (REQUEST_TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["0", "-3", "soon"] {
            let result = Config::from_lookup(lookup_from(&[
                (CREDENTIALS_FILE_VAR, "sa.json"),
                (SPREADSHEET_ID_VAR, "1AbC"),
                (REQUEST_TIMEOUT_VAR, bad),
            ]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { var: REQUEST_TIMEOUT_VAR, .. })),
                "timeout {:?} should be rejected",
                bad
            );
        }
    }
}
