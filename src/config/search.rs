//! Search API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::sources::MAX_SOURCES;

/// RapidAPI-style search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// API key. When absent the static source list is always used.
    pub api_key: Option<Secret<String>>,

    /// Full endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `X-RapidAPI-Host` header value
    #[serde(default = "default_host")]
    pub host: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Minimum milliseconds between external calls
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u64,

    /// Maximum sources kept per turn
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
}

impl SearchConfig {
    /// The API key, if one is configured and non-blank
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get cooldown as Duration
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidUrl("search.base_url"));
        }
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingRequired("search.host"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout("search"));
        }
        if self.result_cap == 0 || self.result_cap > MAX_SOURCES {
            return Err(ValidationError::InvalidResultCap);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            host: default_host(),
            timeout_secs: default_timeout(),
            cooldown_ms: default_cooldown(),
            result_cap: default_result_cap(),
        }
    }
}

fn default_base_url() -> String {
    "https://google-search74.p.rapidapi.com/".to_string()
}

fn default_host() -> String {
    "google-search74.p.rapidapi.com".to_string()
}

fn default_timeout() -> u64 {
    8
}

fn default_cooldown() -> u64 {
    2000
}

fn default_result_cap() -> usize {
    MAX_SOURCES
}
