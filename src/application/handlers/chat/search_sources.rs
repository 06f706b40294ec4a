//! SourceSearchService - Rate-limited source lookup with static fallback.
//!
//! At most one external search is started per cooldown window. The slot is
//! reserved before the request goes out, so a failed call still consumes it.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::sources::{
    fallback_related_topics, fallback_sources, rank_sources, SourceRecord, MAX_RELATED_TOPICS,
    MAX_SOURCES,
};
use crate::ports::{Clock, RawSearchHit, SearchHits, SearchProvider, SearchQuery};

/// Longest query string sent upstream, in chars.
pub const MAX_QUERY_CHARS: usize = 100;

const NEVER: u64 = u64::MAX;
const NO_DESCRIPTION: &str = "No description available.";

/// Tunables for the search stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Minimum spacing between external calls.
    pub cooldown: Duration,
    /// Maximum sources returned.
    pub result_cap: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(2),
            result_cap: MAX_SOURCES,
        }
    }
}

/// Where a set of sources came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Api,
    Fallback,
}

/// Output of the search stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSearchOutcome {
    pub results: Vec<SourceRecord>,
    pub related_topics: Vec<String>,
    pub origin: SourceOrigin,
}

impl SourceSearchOutcome {
    fn fallback(symptoms: &BTreeSet<String>) -> Self {
        Self {
            results: fallback_sources(),
            related_topics: fallback_related_topics(symptoms),
            origin: SourceOrigin::Fallback,
        }
    }
}

/// Search stage of the turn pipeline. Never fails.
pub struct SourceSearchService {
    provider: Option<Arc<dyn SearchProvider>>,
    clock: Arc<dyn Clock>,
    settings: SearchSettings,
    last_call_millis: AtomicU64,
}

impl SourceSearchService {
    /// `provider` is `None` when no search credential is configured.
    pub fn new(
        provider: Option<Arc<dyn SearchProvider>>,
        clock: Arc<dyn Clock>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            provider,
            clock,
            settings,
            last_call_millis: AtomicU64::new(NEVER),
        }
    }

    pub async fn search(&self, symptoms: &BTreeSet<String>, user_query: &str) -> SourceSearchOutcome {
        let Some(provider) = self.provider.as_ref() else {
            tracing::debug!("search provider not configured; using fallback sources");
            return SourceSearchOutcome::fallback(symptoms);
        };

        if !self.try_reserve_slot() {
            tracing::debug!("search cooldown active; using fallback sources");
            return SourceSearchOutcome::fallback(symptoms);
        }

        let query = SearchQuery::new(build_query(symptoms, user_query), self.settings.result_cap);
        match provider.search(&query).await {
            Ok(hits) => self.map_hits(hits, symptoms),
            Err(err) => {
                tracing::warn!(error = %err, "search failed; using fallback sources");
                SourceSearchOutcome::fallback(symptoms)
            }
        }
    }

    /// Claims the call slot if the cooldown has elapsed since the last claim.
    ///
    /// A clock that stepped back past the last claim counts as elapsed.
    fn try_reserve_slot(&self) -> bool {
        let now = self.clock.now_millis();
        let cooldown = self.settings.cooldown.as_millis() as u64;
        let mut last = self.last_call_millis.load(Ordering::Acquire);

        loop {
            if last != NEVER && now >= last && now - last < cooldown {
                return false;
            }
            match self.last_call_millis.compare_exchange_weak(
                last,
                now,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
    }

    fn map_hits(&self, hits: SearchHits, symptoms: &BTreeSet<String>) -> SourceSearchOutcome {
        let records: Vec<SourceRecord> = hits
            .results
            .into_iter()
            .enumerate()
            .filter_map(|(index, hit)| to_source_record(index, hit))
            .collect();

        let results = rank_sources(records, self.settings.result_cap);
        if results.is_empty() {
            tracing::debug!("search returned no usable hits; using fallback sources");
            return SourceSearchOutcome::fallback(symptoms);
        }

        let mut related_topics: Vec<String> = Vec::new();
        for keyword in hits.related_keywords {
            let keyword = keyword.trim();
            if !keyword.is_empty() && !related_topics.iter().any(|k| k == keyword) {
                related_topics.push(keyword.to_string());
            }
        }
        related_topics.truncate(MAX_RELATED_TOPICS);
        if related_topics.is_empty() {
            related_topics = fallback_related_topics(symptoms);
        }

        SourceSearchOutcome {
            results,
            related_topics,
            origin: SourceOrigin::Api,
        }
    }
}

/// Search text for a turn, truncated on a char boundary.
fn build_query(symptoms: &BTreeSet<String>, user_query: &str) -> String {
    let query = if symptoms.is_empty() {
        user_query.trim().to_string()
    } else {
        format!(
            "{} symptoms causes treatment",
            symptoms.iter().cloned().collect::<Vec<_>>().join(" ")
        )
    };
    query.chars().take(MAX_QUERY_CHARS).collect()
}

fn to_source_record(index: usize, hit: RawSearchHit) -> Option<SourceRecord> {
    let url = hit.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
    let title = hit
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.clone());
    let description = hit
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let position = hit.position.unwrap_or(index as u32 + 1);

    Some(SourceRecord::new(position, url, title, description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::search::MockSearchProvider;
    use crate::domain::sources::SourceCategory;

    fn symptoms(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn service(provider: &MockSearchProvider, clock: &ManualClock) -> SourceSearchService {
        SourceSearchService::new(
            Some(Arc::new(provider.clone())),
            Arc::new(clock.clone()),
            SearchSettings::default(),
        )
    }

    #[tokio::test]
    async fn missing_provider_returns_fallback() {
        let svc = SourceSearchService::new(
            None,
            Arc::new(ManualClock::starting_at(0)),
            SearchSettings::default(),
        );

        let outcome = svc.search(&symptoms(&["cough"]), "I have a cough").await;

        assert_eq!(outcome.origin, SourceOrigin::Fallback);
        assert_eq!(outcome.results, fallback_sources());
        assert_eq!(outcome.related_topics, vec!["cough causes", "cough treatment"]);
    }

    #[tokio::test]
    async fn second_call_within_cooldown_skips_provider() {
        let provider = MockSearchProvider::new()
            .with_urls(&[("https://www.nih.gov/flu", "Flu")])
            .with_urls(&[("https://www.nih.gov/cold", "Cold")]);
        let clock = ManualClock::starting_at(10_000);
        let svc = service(&provider, &clock);

        let first = svc.search(&symptoms(&["fever"]), "fever").await;
        clock.advance(Duration::from_millis(1_500));
        let second = svc.search(&symptoms(&["fever"]), "fever").await;

        assert_eq!(first.origin, SourceOrigin::Api);
        assert_eq!(second.origin, SourceOrigin::Fallback);
        assert_eq!(provider.call_count(), 1);

        clock.advance(Duration::from_millis(600));
        let third = svc.search(&symptoms(&["fever"]), "fever").await;
        assert_eq!(third.origin, SourceOrigin::Api);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn clock_stepping_back_does_not_block_search() {
        let provider = MockSearchProvider::new()
            .with_urls(&[("https://www.nih.gov/flu", "Flu")])
            .with_urls(&[("https://www.nih.gov/cold", "Cold")]);
        let clock = ManualClock::starting_at(10_000_000);
        let svc = service(&provider, &clock);

        let first = svc.search(&symptoms(&["fever"]), "fever").await;
        clock.rewind(Duration::from_secs(3_600));
        clock.advance(Duration::from_secs(600));
        let second = svc.search(&symptoms(&["fever"]), "fever").await;

        assert_eq!(first.origin, SourceOrigin::Api);
        assert_eq!(second.origin, SourceOrigin::Api);
        assert_eq!(provider.call_count(), 2);

        clock.advance(Duration::from_millis(500));
        let third = svc.search(&symptoms(&["fever"]), "fever").await;
        assert_eq!(third.origin, SourceOrigin::Fallback);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_call_still_consumes_cooldown() {
        let provider = MockSearchProvider::new()
            .with_network_error("connection reset")
            .with_urls(&[("https://www.cdc.gov/x", "X")]);
        let clock = ManualClock::starting_at(0);
        let svc = service(&provider, &clock);

        let first = svc.search(&symptoms(&[]), "rash").await;
        let second = svc.search(&symptoms(&[]), "rash").await;

        assert_eq!(first.origin, SourceOrigin::Fallback);
        assert_eq!(second.origin, SourceOrigin::Fallback);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_returns_five_fallback_sources() {
        let provider = MockSearchProvider::new().with_malformed_payload("expected value at line 1");
        let svc = service(&provider, &ManualClock::starting_at(0));

        let outcome = svc.search(&symptoms(&["headache"]), "headache").await;

        assert_eq!(outcome.origin, SourceOrigin::Fallback);
        assert_eq!(outcome.results.len(), 5);
    }

    #[tokio::test]
    async fn empty_result_set_falls_back() {
        let provider = MockSearchProvider::new().with_hits(SearchHits {
            results: vec![RawSearchHit {
                title: Some("No link".into()),
                ..RawSearchHit::default()
            }],
            related_keywords: vec!["ignored".into()],
        });
        let svc = service(&provider, &ManualClock::starting_at(0));

        let outcome = svc.search(&symptoms(&["cough"]), "cough").await;

        assert_eq!(outcome.origin, SourceOrigin::Fallback);
    }

    #[tokio::test]
    async fn hits_are_ranked_deduplicated_and_capped() {
        let provider = MockSearchProvider::new().with_urls(&[
            ("https://someone.blogspot.com/a", "Blog"),
            ("https://www.webmd.com/a", "WebMD"),
            ("https://www.cdc.gov/a", "CDC"),
            ("https://www.webmd.com/a", "WebMD again"),
            ("https://example.com/1", "E1"),
            ("https://example.com/2", "E2"),
            ("https://pubmed.ncbi.nlm.nih.gov/1", "Pubmed"),
        ]);
        let svc = service(&provider, &ManualClock::starting_at(0));

        let outcome = svc.search(&symptoms(&["cough"]), "cough").await;

        assert_eq!(outcome.origin, SourceOrigin::Api);
        assert_eq!(outcome.results.len(), MAX_SOURCES);
        assert_eq!(outcome.results[0].category, SourceCategory::GovernmentHealth);
        let urls: Vec<&str> = outcome.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls.iter().filter(|u| **u == "https://www.webmd.com/a").count(),
            1
        );
        assert!(!urls.contains(&"https://example.com/2"));
    }

    #[tokio::test]
    async fn missing_fields_get_placeholders() {
        let provider = MockSearchProvider::new().with_hits(SearchHits {
            results: vec![RawSearchHit {
                url: Some("https://medlineplus.gov/cough.html".into()),
                ..RawSearchHit::default()
            }],
            related_keywords: vec!["cough remedies".into(), " ".into()],
        });
        let svc = service(&provider, &ManualClock::starting_at(0));

        let outcome = svc.search(&symptoms(&["cough"]), "cough").await;

        let record = &outcome.results[0];
        assert_eq!(record.position, 1);
        assert_eq!(record.title, "https://medlineplus.gov/cough.html");
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(outcome.related_topics, vec!["cough remedies"]);
    }

    #[tokio::test]
    async fn query_is_built_from_symptoms_and_truncated() {
        let provider = MockSearchProvider::new();
        let svc = service(&provider, &ManualClock::starting_at(0));
        let long_symptom = "é".repeat(150);

        svc.search(&symptoms(&["cough", "fever"]), "ignored").await;
        let calls = provider.get_calls();
        assert_eq!(calls[0].text, "cough fever symptoms causes treatment");
        assert_eq!(calls[0].limit, MAX_SOURCES);

        assert_eq!(build_query(&symptoms(&[]), &long_symptom).chars().count(), MAX_QUERY_CHARS);
    }
}
