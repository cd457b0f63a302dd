//! Application Configuration Module
//!
//! Loads the coach's settings from the environment (and a `.env` file when
//! present) into a single struct that `main` passes around.

use std::env;
use std::time::Duration;
use tracing::Level;

pub const API_URL_VAR: &str = "INTERVIEW_API_URL";
pub const API_TOKEN_VAR: &str = "INTERVIEW_API_TOKEN";
pub const TIMEOUT_VAR: &str = "INTERVIEW_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `INTERVIEW_API_URL`: (Optional) Base URL of the interview service. Defaults to "http://localhost:8000".
    // *   `INTERVIEW_API_TOKEN`: Bearer token for the service. Required unless running offline.
    // *   `INTERVIEW_TIMEOUT_SECS`: (Optional) Per-request timeout. Defaults to 60.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env(offline: bool) -> Result<Self, ConfigError> {
        // Ignored if there is no .env file.
        dotenvy::dotenv().ok();
        Self::load(offline)
    }

    fn load(offline: bool) -> Result<Self, ConfigError> {
        let api_url = env::var(API_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match env::var(TIMEOUT_VAR) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    var: TIMEOUT_VAR.to_string(),
                    value,
                })?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level_str = env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidValue {
                var: "RUST_LOG".to_string(),
                value: log_level_str,
            })?;

        // The token itself is read per request; only its presence is checked here.
        let has_token = env::var(API_TOKEN_VAR).is_ok_and(|token| !token.trim().is_empty());
        if !offline && !has_token {
            return Err(ConfigError::MissingVar(format!(
                "{API_TOKEN_VAR} must be set unless running with --offline"
            )));
        }

        Ok(Self {
            api_url,
            timeout,
            log_level,
        })
    }
}
