//! Environment-backed configuration.
//!
//! `.env` files are loaded by `main` (dotenvy) before this runs, so every
//! value here comes from the process environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::info;

use crate::error::{PlatterError, Result};
use crate::providers::DEFAULT_GEMINI_MODEL;

/// Default prompt-cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database holding the `menu` table.
    pub database_path: String,
    /// Gemini API key, sent as the `x-goog-api-key` header.
    pub gemini_api_key: String,
    /// Gemini model used for completions.
    pub gemini_model: String,
    /// Listen address.
    pub bind: String,
    /// Listen port.
    pub port: u16,
    /// Prompt-cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl Config {
    /// Load the configuration from the environment.
    ///
    /// `DATABASE_PATH` and `GEMINI_API_KEY` are required; everything else
    /// falls back to a logged default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_path: require("DATABASE_PATH")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: load_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            bind: load_or("BIND", "0.0.0.0"),
            port: parse_or("PORT", 5000)?,
            cache_ttl_secs: parse_or("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PlatterError::Config(format!("{key} must be set")))
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|e| PlatterError::Config(format!("invalid {key} value '{raw}': {e}"))),
        _ => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global, so these tests use unique keys
    // instead of the real ones to stay independent of each other.

    #[test]
    fn test_require_missing_is_config_error() {
        let err = require("PLATTER_TEST_MISSING_KEY").unwrap_err();
        assert!(matches!(err, PlatterError::Config(_)));
    }

    #[test]
    fn test_load_or_falls_back_to_default() {
        assert_eq!(load_or("PLATTER_TEST_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("PLATTER_TEST_UNSET_PORT", 5000).unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        std::env::set_var("PLATTER_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_or("PLATTER_TEST_BAD_PORT", 5000);
        assert!(matches!(result, Err(PlatterError::Config(_))));
        std::env::remove_var("PLATTER_TEST_BAD_PORT");
    }

    #[test]
    fn test_parse_or_reads_value() {
        std::env::set_var("PLATTER_TEST_GOOD_PORT", "8080");
        let port: u16 = parse_or("PLATTER_TEST_GOOD_PORT", 5000).unwrap();
        assert_eq!(port, 8080);
        std::env::remove_var("PLATTER_TEST_GOOD_PORT");
    }
}
