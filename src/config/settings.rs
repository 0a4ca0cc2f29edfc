use std::fmt;
use std::path::PathBuf;

use chrono::Duration;
use http::HeaderName;
use serde::Deserialize;

use crate::auth::credential::Credential;
use crate::cache::token::clamp_valid_duration;
use crate::error::Error;
use crate::resilience::retry::RetrySettings;
use crate::utils::constants::{
    BASE_URL, CACHE_DIR_NAME, DEBUG_BASE_URL, DEFAULT_AUTH_HEADER, DEFAULT_AUTH_SCHEME,
    DEFAULT_INVALID_TOKEN_CODE, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY_MS,
    DEFAULT_RETRY_MAX_DELAY_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_DURATION_HOURS,
};

/// ================================
/// Client configuration
/// ================================
#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    /// HTTP timeout per request, seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    pub app_key: String,
    pub app_token: String,
    /// token lifetime in hours, clamped to 1..=10
    #[serde(default = "default_token_duration")]
    pub token_duration: u64,
    pub base_url: Option<String>,
    pub cache_dir: Option<PathBuf>,
    /// business codes meaning "token rejected"
    #[serde(default = "default_invalid_token_codes")]
    pub invalid_token_codes: Vec<i64>,
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    /// empty scheme sends the bare token
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    pub retry: Option<RetryConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RetryConfig {
    pub attempts: Option<u32>,
    /// will be mutiply by 2 on every attempt until max_delay_ms
    pub base_delay_ms: Option<u64>,
    /// invariant: >= base_delay_ms
    pub max_delay_ms: Option<u64>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl Config {
    pub fn new(app_key: impl Into<String>, app_token: impl Into<String>) -> Self {
        Self {
            debug: false,
            timeout: default_timeout(),
            app_key: app_key.into(),
            app_token: app_token.into(),
            token_duration: default_token_duration(),
            base_url: None,
            cache_dir: None,
            invalid_token_codes: default_invalid_token_codes(),
            auth_header: default_auth_header(),
            auth_scheme: default_auth_scheme(),
            retry: None,
            logging: None,
        }
    }

    pub fn credential(&self) -> Credential {
        Credential::new(self.app_key.clone(), self.app_token.clone())
    }

    pub fn base_url(&self) -> String {
        let url = match (&self.base_url, self.debug) {
            (Some(url), _) => url.as_str(),
            (None, true) => DEBUG_BASE_URL,
            (None, false) => BASE_URL,
        };
        url.trim_end_matches('/').to_owned()
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(CACHE_DIR_NAME))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout)
    }

    pub fn token_valid_for(&self) -> Duration {
        clamp_valid_duration(self.token_duration)
    }

    pub fn retry_settings(&self) -> RetrySettings {
        let retry = self.retry.clone().unwrap_or_default();
        RetrySettings {
            attempts: retry.attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
            base_delay_ms: retry.base_delay_ms.unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS),
            max_delay_ms: retry.max_delay_ms.unwrap_or(DEFAULT_RETRY_MAX_DELAY_MS),
        }
    }

    /// Checks every invariant and reports all violations together.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors: Vec<String> = Vec::new();

        if self.app_key.trim().is_empty() {
            errors.push("app_key must not be empty".to_owned());
        }
        if self.app_token.trim().is_empty() {
            errors.push("app_token must not be empty".to_owned());
        }
        if self.timeout == 0 {
            errors.push("timeout must be greater than 0 seconds".to_owned());
        }
        if self.auth_header.trim().is_empty() {
            errors.push("auth_header must not be empty".to_owned());
        } else if HeaderName::from_bytes(self.auth_header.as_bytes()).is_err() {
            errors.push(format!("auth_header '{}' is not a valid header name", self.auth_header));
        }
        if self.invalid_token_codes.is_empty() {
            errors.push("invalid_token_codes must list at least one code".to_owned());
        }
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("base_url '{url}' must be an http(s) URL"));
            }
        }

        let retry = self.retry_settings();
        if retry.attempts == 0 {
            errors.push("retry.attempts must be at least 1".to_owned());
        }
        if retry.base_delay_ms > retry.max_delay_ms {
            errors.push(format!(
                "retry.base_delay_ms ({}) must not exceed retry.max_delay_ms ({})",
                retry.base_delay_ms, retry.max_delay_ms
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors.join("; ")))
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("app_key", &self.app_key)
            .field("app_token", &"<redacted>")
            .field("token_duration", &self.token_duration)
            .field("base_url", &self.base_url)
            .field("cache_dir", &self.cache_dir)
            .field("invalid_token_codes", &self.invalid_token_codes)
            .field("auth_header", &self.auth_header)
            .field("auth_scheme", &self.auth_scheme)
            .field("retry", &self.retry)
            .field("logging", &self.logging)
            .finish()
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_duration() -> u64 {
    DEFAULT_TOKEN_DURATION_HOURS
}

fn default_invalid_token_codes() -> Vec<i64> {
    vec![DEFAULT_INVALID_TOKEN_CODE]
}

fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.to_owned()
}

fn default_auth_scheme() -> String {
    DEFAULT_AUTH_SCHEME.to_owned()
}
