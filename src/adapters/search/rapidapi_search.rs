//! RapidAPI Search Provider - Implementation of SearchProvider for
//! RapidAPI-hosted web search endpoints.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RapidApiSearchConfig::new(api_key)
//!     .with_base_url("https://google-search74.p.rapidapi.com/")
//!     .with_host("google-search74.p.rapidapi.com");
//!
//! let provider = RapidApiSearchProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{RawSearchHit, SearchError, SearchHits, SearchProvider, SearchQuery};

/// Configuration for the RapidAPI search provider.
#[derive(Debug, Clone)]
pub struct RapidApiSearchConfig {
    api_key: Secret<String>,
    /// Full endpoint URL.
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header.
    pub host: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RapidApiSearchConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: "https://google-search74.p.rapidapi.com/".to_string(),
            host: "google-search74.p.rapidapi.com".to_string(),
            timeout: Duration::from_secs(8),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// RapidAPI web search implementation.
pub struct RapidApiSearchProvider {
    config: RapidApiSearchConfig,
    client: Client,
}

impl RapidApiSearchProvider {
    /// # Errors
    ///
    /// Returns `SearchError::Network` if the HTTP client cannot be built.
    pub fn new(config: RapidApiSearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, query: &SearchQuery) -> Result<Response, SearchError> {
        let limit = query.limit.to_string();

        self.client
            .get(&self.config.base_url)
            .header("X-RapidAPI-Key", self.config.api_key.expose_secret())
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&[
                ("query", query.text.as_str()),
                ("limit", limit.as_str()),
                ("related_keywords", "true"),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            SearchError::network(format!("Connection failed: {}", e))
        } else {
            SearchError::network(e.to_string())
        }
    }

    async fn parse_response(&self, response: Response) -> Result<SearchHits, SearchError> {
        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            401 | 403 => return Err(SearchError::AuthenticationFailed),
            429 => return Err(SearchError::RateLimited),
            code => return Err(SearchError::Status { status: code }),
        }

        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        let wire: WireResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(wire.into())
    }
}

#[async_trait]
impl SearchProvider for RapidApiSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<SearchHits, SearchError> {
        let response = self.send_request(query).await?;
        self.parse_response(response).await
    }
}

// ----- RapidAPI Wire Types -----

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    results: Vec<WireHit>,
    #[serde(default)]
    related_keywords: Vec<WireKeyword>,
}

#[derive(Debug, Deserialize)]
struct WireHit {
    position: Option<u32>,
    #[serde(alias = "link")]
    url: Option<String>,
    title: Option<String>,
    #[serde(alias = "snippet")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireKeyword {
    Plain(String),
    Object { keyword: String },
}

impl From<WireResponse> for SearchHits {
    fn from(wire: WireResponse) -> Self {
        SearchHits {
            results: wire
                .results
                .into_iter()
                .map(|hit| RawSearchHit {
                    position: hit.position,
                    url: hit.url,
                    title: hit.title,
                    description: hit.description,
                })
                .collect(),
            related_keywords: wire
                .related_keywords
                .into_iter()
                .map(|k| match k {
                    WireKeyword::Plain(keyword) | WireKeyword::Object { keyword } => keyword,
                })
                .filter(|k| !k.trim().is_empty())
                .collect(),
        }
    }
}
