//! Mock Search Provider for testing.
//!
//! Queued responses, call recording and error injection, mirroring
//! `MockAIProvider`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{RawSearchHit, SearchError, SearchHits, SearchProvider, SearchQuery};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockSearchResponse {
    Hits(SearchHits),
    Network(String),
    Malformed(String),
}

/// Mock search provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    responses: Arc<Mutex<VecDeque<MockSearchResponse>>>,
    calls: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, response: MockSearchResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Queues a successful response.
    pub fn with_hits(self, hits: SearchHits) -> Self {
        self.push(MockSearchResponse::Hits(hits))
    }

    /// Queues a response built from `(url, title)` pairs.
    pub fn with_urls(self, urls: &[(&str, &str)]) -> Self {
        let results = urls
            .iter()
            .map(|(url, title)| RawSearchHit {
                position: None,
                url: Some(url.to_string()),
                title: Some(title.to_string()),
                description: Some(format!("About {}", title)),
            })
            .collect();
        self.with_hits(SearchHits {
            results,
            related_keywords: Vec::new(),
        })
    }

    /// Queues a network failure.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.push(MockSearchResponse::Network(message.into()))
    }

    /// Queues a payload decode failure.
    pub fn with_malformed_payload(self, message: impl Into<String>) -> Self {
        self.push(MockSearchResponse::Malformed(message.into()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<SearchHits, SearchError> {
        self.calls.lock().unwrap().push(query.clone());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockSearchResponse::Hits(hits)) => Ok(hits),
            Some(MockSearchResponse::Network(message)) => Err(SearchError::network(message)),
            Some(MockSearchResponse::Malformed(message)) => Err(SearchError::parse(message)),
            None => Ok(SearchHits::default()),
        }
    }
}
