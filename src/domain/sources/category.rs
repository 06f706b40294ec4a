//! Trust categories for source domains.

use serde::{Deserialize, Serialize};
use std::fmt;

const GOVERNMENT_DOMAINS: &[&str] = &[
    ".gov", "who.int", "nhs.uk", "europa.eu", "canada.ca", "gov.uk",
];

const JOURNAL_DOMAINS: &[&str] = &[
    "pubmed",
    "nejm.org",
    "thelancet.com",
    "jamanetwork.com",
    "bmj.com",
    "nature.com",
    "sciencedirect.com",
    "cochranelibrary.com",
    "springer.com",
    "wiley.com",
];

const HEALTH_WEBSITE_DOMAINS: &[&str] = &[
    "mayoclinic.org",
    "clevelandclinic.org",
    "hopkinsmedicine.org",
    "webmd.com",
    "healthline.com",
    "medicalnewstoday.com",
    "verywellhealth.com",
    "drugs.com",
    "kidshealth.org",
    "patient.info",
];

const BLOG_MARKERS: &[&str] = &[
    "blog", "medium.com", "wordpress", "substack", "tumblr", "reddit.com", "quora.com",
];

/// How much a source's domain can be trusted for health information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    GovernmentHealth,
    MedicalJournal,
    HealthWebsite,
    MedicalBlog,
    General,
}

impl SourceCategory {
    /// Classifies a URL by substring match against the trusted-domain tables.
    ///
    /// Government beats journal beats health site beats blog; anything else is general.
    pub fn classify(url: &str) -> Self {
        let url = url.to_lowercase();
        let host = host_of(&url);

        if GOVERNMENT_DOMAINS.iter().any(|d| host.contains(d)) {
            SourceCategory::GovernmentHealth
        } else if JOURNAL_DOMAINS.iter().any(|d| host.contains(d)) {
            SourceCategory::MedicalJournal
        } else if HEALTH_WEBSITE_DOMAINS.iter().any(|d| host.contains(d)) {
            SourceCategory::HealthWebsite
        } else if BLOG_MARKERS.iter().any(|d| url.contains(d)) {
            SourceCategory::MedicalBlog
        } else {
            SourceCategory::General
        }
    }

    /// Reliability score used for ranking, 5 (best) down to 1.
    pub fn reliability(&self) -> u8 {
        match self {
            SourceCategory::GovernmentHealth => 5,
            SourceCategory::MedicalJournal => 4,
            SourceCategory::HealthWebsite => 3,
            SourceCategory::MedicalBlog => 2,
            SourceCategory::General => 1,
        }
    }

    /// Human-readable tag shown next to a source.
    pub fn label(&self) -> &'static str {
        match self {
            SourceCategory::GovernmentHealth => "Government Health",
            SourceCategory::MedicalJournal => "Medical Journal",
            SourceCategory::HealthWebsite => "Health Website",
            SourceCategory::MedicalBlog => "Medical Blog",
            SourceCategory::General => "General",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Host portion of a lower-cased URL, or the whole string when it has no scheme.
fn host_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    without_scheme
        .split(&['/', '?', '#'][..])
        .next()
        .unwrap_or(without_scheme)
}
