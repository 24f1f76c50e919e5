use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_VAR: &str = "NEWS_API_KEY";
const BASE_URL_VAR: &str = "NEWS_BASE_URL";
const COUNTRY_VAR: &str = "NEWS_COUNTRY";
const READ_TIMEOUT_VAR: &str = "NEWS_READ_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} is set but empty")]
    Empty(&'static str),
    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Everything the client needs from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    pub base_url: String,
    pub api_key: String,
    pub country: String,
    pub read_timeout: Duration,
}

impl NewsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            country: DEFAULT_COUNTRY.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Build the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let mut config = NewsConfig::new(api_key);

        if let Some(base_url) = optional(&lookup, BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }
        if let Some(country) = optional(&lookup, COUNTRY_VAR) {
            config = config.with_country(country);
        }
        if let Some(raw) = optional(&lookup, READ_TIMEOUT_VAR) {
            let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: READ_TIMEOUT_VAR,
                message: e.to_string(),
            })?;
            config = config.with_read_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or(ConfigError::Missing(key))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(trimmed.to_string())
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
