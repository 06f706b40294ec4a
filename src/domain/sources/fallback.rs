//! Static sources used whenever live search is unavailable.

use super::{SourceRecord, MAX_RELATED_TOPICS};

const FALLBACK_SOURCES: &[(&str, &str, &str)] = &[
    (
        "https://www.cdc.gov/",
        "Centers for Disease Control and Prevention",
        "Official public health information on diseases, conditions, and prevention.",
    ),
    (
        "https://medlineplus.gov/",
        "MedlinePlus - Trusted Health Information",
        "Health topics, symptoms, and treatment information from the U.S. National Library of Medicine.",
    ),
    (
        "https://www.mayoclinic.org/diseases-conditions",
        "Mayo Clinic - Diseases & Conditions",
        "Expert overviews of symptoms, causes, diagnosis, and treatment.",
    ),
    (
        "https://my.clevelandclinic.org/health",
        "Cleveland Clinic Health Library",
        "Clinician-reviewed articles on symptoms and conditions.",
    ),
    (
        "https://www.webmd.com/",
        "WebMD - Symptom Information",
        "Consumer guides to symptoms, conditions, and when to see a doctor.",
    ),
];

/// The five hardcoded reputable medical sources, already in ranked order.
pub fn fallback_sources() -> Vec<SourceRecord> {
    FALLBACK_SOURCES
        .iter()
        .enumerate()
        .map(|(i, (url, title, description))| {
            SourceRecord::new(i as u32 + 1, *url, *title, *description)
        })
        .collect()
}

/// Related topics derived from the symptoms alone; deterministic for a given input.
pub fn fallback_related_topics<'a>(symptoms: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    symptoms
        .into_iter()
        .flat_map(|s| [format!("{s} causes"), format!("{s} treatment")])
        .take(MAX_RELATED_TOPICS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sources::{rank_sources, SourceCategory, MAX_SOURCES};

    #[test]
    fn fallback_has_five_entries() {
        assert_eq!(fallback_sources().len(), 5);
    }

    #[test]
    fn fallback_is_already_ranked() {
        let sources = fallback_sources();
        assert_eq!(rank_sources(sources.clone(), MAX_SOURCES), sources);
        assert_eq!(sources[0].category, SourceCategory::GovernmentHealth);
    }

    #[test]
    fn related_topics_are_capped() {
        let symptoms: Vec<String> = vec!["fever".into(), "cough".into(), "rash".into()];
        let topics = fallback_related_topics(&symptoms);
        assert_eq!(topics.len(), MAX_RELATED_TOPICS);
        assert_eq!(topics[0], "fever causes");
        assert_eq!(topics[1], "fever treatment");
    }

    #[test]
    fn no_symptoms_means_no_topics() {
        let symptoms: Vec<String> = Vec::new();
        assert!(fallback_related_topics(&symptoms).is_empty());
    }
}
