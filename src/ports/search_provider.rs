//! Search Provider Port - Interface for web search used to cite sources.
//!
//! Adapters return raw hits exactly as the upstream API described them;
//! classification, ranking and fallback live in the application layer.

use async_trait::async_trait;

/// Port for web search calls.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a single search query.
    async fn search(&self, query: &SearchQuery) -> Result<SearchHits, SearchError>;
}

/// A search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query text, already truncated by the caller.
    pub text: String,
    /// Maximum results requested.
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            limit,
        }
    }
}

/// One hit as returned by the provider. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchHit {
    pub position: Option<u32>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Search response: hits plus any related keywords the provider suggested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub results: Vec<RawSearchHit>,
    pub related_keywords: Vec<String>,
}

/// Search provider errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited")]
    RateLimited,

    /// Non-success status that is not covered above.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SearchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_displays_correctly() {
        assert_eq!(
            SearchError::Status { status: 503 }.to_string(),
            "unexpected status 503"
        );
        assert_eq!(
            SearchError::Timeout { timeout_secs: 8 }.to_string(),
            "request timed out after 8s"
        );
    }
}
