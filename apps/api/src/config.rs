use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::gemini::DEFAULT_API_BASE;

const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com";
const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com";

/// Application configuration loaded from environment variables.
///
/// Credentials are optional: a missing `GEMINI_API_KEY` or `GOOGLE_ACCESS_TOKEN`
/// surfaces as a configuration fault on the routes that need it, not at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub context_file: PathBuf,
    pub llm_timeout: Duration,
    pub chat_session_capacity: usize,
    pub chat_history_limit: usize,
    pub email_concurrency: usize,
    pub google_access_token: Option<String>,
    pub gmail_api_base: String,
    pub calendar_api_base: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| optional(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_api_base: or_default("GEMINI_API_BASE", DEFAULT_API_BASE),
            context_file: PathBuf::from(or_default("CONTEXT_FILE", "context.json")),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?),
            chat_session_capacity: parse_or(&lookup, "CHAT_SESSION_CAPACITY", 1000)?,
            chat_history_limit: parse_or(&lookup, "CHAT_HISTORY_LIMIT", 40)?,
            email_concurrency: parse_or(&lookup, "EMAIL_CONCURRENCY", 4)?,
            google_access_token: optional("GOOGLE_ACCESS_TOKEN"),
            gmail_api_base: or_default("GMAIL_API_BASE", DEFAULT_GMAIL_API_BASE),
            calendar_api_base: or_default("CALENDAR_API_BASE", DEFAULT_CALENDAR_API_BASE),
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(config.google_access_token.is_none());
        assert_eq!(config.context_file, PathBuf::from("context.json"));
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.chat_session_capacity, 1000);
        assert_eq!(config.chat_history_limit, 40);
        assert_eq!(config.port, 8000);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "  "), ("GOOGLE_ACCESS_TOKEN", "")]).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(config.google_access_token.is_none());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("PORT", "9090"),
            ("CONTEXT_FILE", "/etc/friday/context.json"),
        ])
        .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
        assert_eq!(config.port, 9090);
        assert_eq!(config.context_file, PathBuf::from("/etc/friday/context.json"));
    }

    #[test]
    fn test_invalid_number_is_an_error_naming_the_key() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
