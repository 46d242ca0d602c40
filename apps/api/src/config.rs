use std::time::Duration;

use thiserror::Error;

use crate::llm_client::{DEEPSEEK_API_URL, DEFAULT_DEADLINE};

const DEFAULT_INCOME_DATA_PATH: &str = "data/suburb_incomes.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables.
/// Validated once at startup; a missing API key is reported, not panicked on.
#[derive(Clone)]
pub struct Config {
    pub deepseek_api_key: String,
    pub deepseek_api_url: String,
    pub completion_timeout: Duration,
    pub income_data_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("deepseek_api_key", &"<redacted>")
            .field("deepseek_api_url", &self.deepseek_api_url)
            .field("completion_timeout", &self.completion_timeout)
            .field("income_data_path", &self.income_data_path)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let deepseek_api_key = lookup("DEEPSEEK_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("DEEPSEEK_API_KEY"))?;

        let completion_timeout = match lookup("COMPLETION_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "COMPLETION_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got '{raw}'"),
                    })
                }
            },
            None => DEFAULT_DEADLINE,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        Ok(Config {
            deepseek_api_key,
            deepseek_api_url: lookup("DEEPSEEK_API_URL")
                .unwrap_or_else(|| DEEPSEEK_API_URL.to_string()),
            completion_timeout,
            income_data_path: lookup("INCOME_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_INCOME_DATA_PATH.to_string()),
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
