//! SourceRecord value object and ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::SourceCategory;

/// Upper bound on sources attached to a single answer.
pub const MAX_SOURCES: usize = 5;

/// Upper bound on related search topics attached to a single answer.
pub const MAX_RELATED_TOPICS: usize = 5;

/// One search result annotated with a trust category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub position: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: SourceCategory,
}

impl SourceRecord {
    /// Creates a record, deriving the category from the URL.
    pub fn new(
        position: u32,
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let category = SourceCategory::classify(&url);
        Self {
            position,
            url,
            title: title.into(),
            description: description.into(),
            category,
        }
    }
}

/// Orders sources by reliability (stable within a category), drops repeated
/// URLs keeping the first, and truncates to `cap`.
pub fn rank_sources(mut sources: Vec<SourceRecord>, cap: usize) -> Vec<SourceRecord> {
    sources.sort_by(|a, b| b.category.reliability().cmp(&a.category.reliability()));

    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert(s.url.clone()))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: u32, url: &str) -> SourceRecord {
        SourceRecord::new(position, url, format!("Title {position}"), "desc")
    }

    #[test]
    fn new_classifies_category() {
        let rec = record(1, "https://www.nih.gov/health");
        assert_eq!(rec.category, SourceCategory::GovernmentHealth);
    }

    #[test]
    fn ranking_sorts_by_reliability() {
        let ranked = rank_sources(
            vec![
                record(1, "https://example.com/a"),
                record(2, "https://www.mayoclinic.org/a"),
                record(3, "https://www.cdc.gov/a"),
            ],
            MAX_SOURCES,
        );
        let positions: Vec<u32> = ranked.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![3, 2, 1]);
    }

    #[test]
    fn ranking_is_stable_within_category() {
        let ranked = rank_sources(
            vec![
                record(1, "https://example.com/a"),
                record(2, "https://example.org/b"),
            ],
            MAX_SOURCES,
        );
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[1].position, 2);
    }

    #[test]
    fn duplicates_are_removed_keeping_first() {
        let ranked = rank_sources(
            vec![
                record(1, "https://www.cdc.gov/a"),
                record(2, "https://www.cdc.gov/a"),
                record(3, "https://example.com/a"),
            ],
            MAX_SOURCES,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].position, 1);
    }

    #[test]
    fn ranking_truncates_to_cap() {
        let many: Vec<SourceRecord> = (1..=8)
            .map(|i| record(i, &format!("https://example.com/{i}")))
            .collect();
        assert_eq!(rank_sources(many, MAX_SOURCES).len(), MAX_SOURCES);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(record(1, "https://www.cdc.gov/a")).unwrap();
        assert_eq!(json["category"], "government_health");
        assert_eq!(json["position"], 1);
    }
}
