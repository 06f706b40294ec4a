//! AnalysisRecord and QueryResult.
//!
//! Both are immutable once built. Constructors enforce the display
//! invariants: capped list lengths, non-empty text, at least one condition.

use serde::{Deserialize, Serialize};

use crate::domain::sources::{fallback_sources, SourceRecord, MAX_RELATED_TOPICS, MAX_SOURCES};
use crate::domain::triage::medical_tables::{self, DISCLAIMER, MAX_CONDITIONS, MAX_REMEDIES};
use crate::domain::triage::UrgencyTier;

use super::ResponseFormatter;

const TECHNICAL_DIFFICULTY_CONDITION: &str = "Unable to analyze - technical difficulty";
const TECHNICAL_DIFFICULTY_ACTION: &str =
    "Please consult a healthcare provider about your symptoms. If they are severe, seek emergency care.";
const TECHNICAL_DIFFICULTY_EXPLANATION: &str = "I'm having technical difficulty analyzing your \
    symptoms right now. Please try again in a moment, and consult a healthcare provider if you \
    are concerned.";
const NO_CONTEXT: &str = "No additional context.";

/// Structured advice attached to an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub possible_conditions: Vec<String>,
    pub urgency_tier: UrgencyTier,
    pub recommended_action: String,
    pub home_remedies: Vec<String>,
    pub when_to_see_doctor: Vec<String>,
    pub disclaimer: String,
}

impl AnalysisRecord {
    /// Builds a record from possibly-incomplete parts, substituting defaults.
    ///
    /// Home remedies are dropped for high and emergency tiers.
    pub fn normalized(
        possible_conditions: Vec<String>,
        urgency_tier: UrgencyTier,
        recommended_action: Option<String>,
        home_remedies: Vec<String>,
        when_to_see_doctor: Vec<String>,
        disclaimer: Option<String>,
        symptom_text: &str,
    ) -> Self {
        let mut conditions = clean_list(possible_conditions, MAX_CONDITIONS);
        if conditions.is_empty() {
            conditions = medical_tables::conditions_for(symptom_text);
        }

        let home_remedies = if urgency_tier.allows_home_remedies() {
            clean_list(home_remedies, MAX_REMEDIES)
        } else {
            Vec::new()
        };

        let mut when_to_see_doctor = clean_list(when_to_see_doctor, usize::MAX);
        if when_to_see_doctor.is_empty() {
            when_to_see_doctor = medical_tables::when_to_see_doctor();
        }

        Self {
            possible_conditions: conditions,
            urgency_tier,
            recommended_action: non_empty_or(recommended_action, urgency_tier.recommended_action()),
            home_remedies,
            when_to_see_doctor,
            disclaimer: non_empty_or(disclaimer, DISCLAIMER),
        }
    }

    /// Advice derived purely from the lookup tables.
    pub fn synthesized(symptom_text: &str, urgency_tier: UrgencyTier) -> Self {
        let remedies = if urgency_tier.allows_home_remedies() {
            medical_tables::remedies_for(symptom_text)
        } else {
            Vec::new()
        };
        Self::normalized(
            medical_tables::conditions_for(symptom_text),
            urgency_tier,
            None,
            remedies,
            Vec::new(),
            None,
            symptom_text,
        )
    }
}

/// Everything produced for one analyzed user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub analysis: AnalysisRecord,
    pub detailed_explanation: String,
    pub sources: Vec<SourceRecord>,
    pub related_topics: Vec<String>,
    pub conversation_context: String,
    pub formatted_text: String,
}

impl QueryResult {
    /// Assembles the aggregate and renders `formatted_text` from it.
    pub fn assemble(
        analysis: AnalysisRecord,
        detailed_explanation: String,
        mut sources: Vec<SourceRecord>,
        related_topics: Vec<String>,
        conversation_context: String,
    ) -> Self {
        sources.truncate(MAX_SOURCES);

        let mut result = Self {
            detailed_explanation: non_empty_or(
                Some(detailed_explanation),
                analysis.recommended_action.as_str(),
            ),
            analysis,
            sources,
            related_topics: clean_list(related_topics, MAX_RELATED_TOPICS),
            conversation_context: non_empty_or(Some(conversation_context), NO_CONTEXT),
            formatted_text: String::new(),
        };
        result.formatted_text = ResponseFormatter::format(&result);
        result
    }

    /// Fixed result returned when the pipeline fails unexpectedly.
    pub fn technical_difficulty() -> Self {
        let analysis = AnalysisRecord {
            possible_conditions: vec![TECHNICAL_DIFFICULTY_CONDITION.to_string()],
            urgency_tier: UrgencyTier::Moderate,
            recommended_action: TECHNICAL_DIFFICULTY_ACTION.to_string(),
            home_remedies: Vec::new(),
            when_to_see_doctor: medical_tables::when_to_see_doctor(),
            disclaimer: DISCLAIMER.to_string(),
        };
        Self::assemble(
            analysis,
            TECHNICAL_DIFFICULTY_EXPLANATION.to_string(),
            fallback_sources(),
            Vec::new(),
            "Analysis unavailable due to a technical error.".to_string(),
        )
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Trims entries, drops blanks and repeats, and keeps at most `cap`.
fn clean_list(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim();
        if item.is_empty() || out.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            continue;
        }
        out.push(item.to_string());
        if out.len() >= cap {
            break;
        }
    }
    out
}
