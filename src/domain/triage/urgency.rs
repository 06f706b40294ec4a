//! Urgency tiers and the keyword classifier that assigns them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal severity classification driving how quickly the user should act.
///
/// Variant order is significant: `Low < Moderate < High < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Moderate,
    High,
    Emergency,
}

impl UrgencyTier {
    /// Returns the wire representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Moderate => "moderate",
            UrgencyTier::High => "high",
            UrgencyTier::Emergency => "emergency",
        }
    }

    /// Tiers that get a banner at the top of the formatted reply.
    pub fn requires_banner(&self) -> bool {
        *self >= UrgencyTier::High
    }

    /// Self-care suggestions are only offered for low and moderate tiers.
    pub fn allows_home_remedies(&self) -> bool {
        *self <= UrgencyTier::Moderate
    }

    /// Fixed recommended action text for the tier.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            UrgencyTier::Emergency => {
                "Call emergency services (911) or go to the nearest emergency room immediately."
            }
            UrgencyTier::High => {
                "Seek medical attention promptly - contact your doctor or visit urgent care today."
            }
            UrgencyTier::Moderate => {
                "Schedule an appointment with your healthcare provider within the next few days if symptoms persist."
            }
            UrgencyTier::Low => {
                "Monitor your symptoms and try self-care measures. Contact a healthcare provider if they worsen."
            }
        }
    }

    /// Parses the loosely-worded urgency labels language models tend to emit.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" | "mild" | "minor" => Some(UrgencyTier::Low),
            "moderate" | "medium" => Some(UrgencyTier::Moderate),
            "high" | "urgent" | "severe" => Some(UrgencyTier::High),
            "emergency" | "critical" => Some(UrgencyTier::Emergency),
            _ => None,
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "trouble breathing",
    "shortness of breath",
    "unconscious",
    "passed out",
    "seizure",
    "stroke",
    "heart attack",
    "severe bleeding",
    "coughing up blood",
    "suicidal",
    "overdose",
    "choking",
    "anaphylaxis",
    "slurred speech",
    "face drooping",
];

const HIGH_KEYWORDS: &[&str] = &[
    "severe pain",
    "severe headache",
    "worst headache",
    "blurry vision",
    "blurred vision",
    "high fever",
    "vomiting blood",
    "blood in stool",
    "blood in urine",
    "persistent vomiting",
    "fainting",
    "fainted",
    "confusion",
    "stiff neck",
    "broken bone",
    "deep cut",
];

const MODERATE_KEYWORDS: &[&str] = &[
    "fever",
    "vomiting",
    "diarrhea",
    "rash",
    "infection",
    "swollen",
    "swelling",
    "dizzy",
    "dizziness",
    "migraine",
    "persistent",
    "earache",
    "sore throat",
    "cough",
];

/// Classifies raw user text into an [`UrgencyTier`] by keyword membership.
///
/// Lists are checked emergency first, then high, then moderate; the first
/// list with a hit decides the tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrgencyClassifier;

impl UrgencyClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, raw_text: &str) -> UrgencyTier {
        let text = raw_text.to_lowercase().replace('\u{2019}', "'");

        let tiers = [
            (UrgencyTier::Emergency, EMERGENCY_KEYWORDS),
            (UrgencyTier::High, HIGH_KEYWORDS),
            (UrgencyTier::Moderate, MODERATE_KEYWORDS),
        ];

        tiers
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(tier, _)| *tier)
            .unwrap_or(UrgencyTier::Low)
    }
}
