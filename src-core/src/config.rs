//! Deployment-time configuration.
//!
//! The browser has no process environment, so values are baked in at build
//! time through `option_env!`. `from_lookup` takes any key lookup, which is
//! what tests use.

use std::time::Duration;

use tracing::Level;

use crate::api::AiProvider;
use crate::error::ConfigError;

pub const API_URL_KEY: &str = "GREENLINT_API_URL";
pub const POLL_SECS_KEY: &str = "GREENLINT_POLL_SECS";
pub const PROVIDER_KEY: &str = "GREENLINT_PROVIDER";
pub const TIMEOUT_SECS_KEY: &str = "GREENLINT_TIMEOUT_SECS";
pub const LOG_KEY: &str = "GREENLINT_LOG";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the analysis service. Empty means same origin.
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub provider: AiProvider,
    pub request_timeout: Duration,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            provider: AiProvider::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Resolve configuration from values captured when the crate was built.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                API_URL_KEY => option_env!("GREENLINT_API_URL"),
                POLL_SECS_KEY => option_env!("GREENLINT_POLL_SECS"),
                PROVIDER_KEY => option_env!("GREENLINT_PROVIDER"),
                TIMEOUT_SECS_KEY => option_env!("GREENLINT_TIMEOUT_SECS"),
                LOG_KEY => option_env!("GREENLINT_LOG"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Resolve configuration from an arbitrary key lookup. Missing or blank
    /// keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get(API_URL_KEY) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(API_URL_KEY, url, "expected an http(s) URL"));
            }
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get(POLL_SECS_KEY) {
            config.poll_interval = positive_secs(POLL_SECS_KEY, raw)?;
        }

        if let Some(raw) = get(PROVIDER_KEY) {
            config.provider = raw
                .parse()
                .map_err(|reason: String| invalid(PROVIDER_KEY, raw.clone(), &reason))?;
        }

        if let Some(raw) = get(TIMEOUT_SECS_KEY) {
            config.request_timeout = positive_secs(TIMEOUT_SECS_KEY, raw)?;
        }

        if let Some(raw) = get(LOG_KEY) {
            config.log_level = raw
                .parse()
                .map_err(|_| invalid(LOG_KEY, raw.clone(), "expected trace, debug, info, warn or error"))?;
        }

        Ok(config)
    }

    /// The base URL to use, falling back to `origin` for same-origin setups.
    pub fn resolve_base_url(&self, origin: &str) -> String {
        if self.api_base_url.is_empty() {
            origin.trim_end_matches('/').to_string()
        } else {
            self.api_base_url.clone()
        }
    }
}

fn positive_secs(key: &'static str, raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(invalid(key, raw, "expected a positive number of seconds")),
    }
}

fn invalid(key: &'static str, value: String, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value,
        reason: reason.to_string(),
    }
}
