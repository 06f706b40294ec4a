//! Interpretation of completion API output.
//!
//! A reply is parsed exactly once into [`CompletionReply`]: either a JSON
//! object matching the analysis shape, or free text that is mined with a
//! few hedging-phrase patterns. Both branches, and the no-reply fallback,
//! end up as a [`CompletionOutcome`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

use crate::domain::triage::medical_tables::{self, MAX_CONDITIONS};
use crate::domain::triage::UrgencyTier;

use super::json_extract::isolate_json_object;
use super::AnalysisRecord;

static HEDGED_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:could be|might be|may be|such as|possibly)\s+(?:a |an |the )?([a-z][a-z' -]{2,40}?)(?:[,.;:!?)\n]|\s+or\s|\s+and\s|\s+which\b|\s+that\b|$)",
    )
    .expect("hedged condition pattern is a valid regex")
});

/// First words that show a hedge is not naming a condition ("may be helpful").
const NON_CONDITION_WORDS: &[&str] = &[
    "helpful", "useful", "necessary", "important", "able", "worth", "best", "good", "caused",
    "related", "due", "time", "wise", "needed", "that", "you", "your", "it", "this",
];

/// Inputs shared by every way of building an analysis for one turn.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub user_query: &'a str,
    pub symptoms: &'a BTreeSet<String>,
    pub urgency: UrgencyTier,
}

impl AnalysisContext<'_> {
    /// Text used for table lookups: the extracted phrases plus the raw query.
    fn symptom_text(&self) -> String {
        let mut text = self
            .symptoms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        text.push(' ');
        text.push_str(&self.user_query.to_lowercase());
        text
    }

    fn default_context(&self) -> String {
        if self.symptoms.is_empty() {
            format!("No specific symptoms identified (urgency: {}).", self.urgency)
        } else {
            format!(
                "Discussed symptoms: {} (urgency: {}).",
                self.symptoms.iter().cloned().collect::<Vec<_>>().join(", "),
                self.urgency
            )
        }
    }

}

fn templated_explanation(urgency: UrgencyTier) -> String {
    format!(
        "Based on the symptoms you described, this appears to be a {} urgency situation. {}",
        urgency,
        urgency.recommended_action()
    )
}

/// Treats an explicit `null` list like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// JSON shape the completion API is asked to produce. Every field is optional
/// and may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredAnalysis {
    #[serde(deserialize_with = "null_as_empty")]
    pub possible_conditions: Vec<String>,
    #[serde(alias = "urgencyTier")]
    pub urgency_level: Option<String>,
    pub recommended_action: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub home_remedies: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub when_to_see_doctor: Vec<String>,
    pub disclaimer: Option<String>,
    pub detailed_explanation: Option<String>,
    pub conversation_context: Option<String>,
}

impl StructuredAnalysis {
    /// True when the object carries conditions, an explanation, an action or a known tier.
    fn is_meaningful(&self) -> bool {
        let has_text = |field: &Option<String>| field.as_deref().is_some_and(|t| !t.trim().is_empty());

        !self.possible_conditions.is_empty()
            || has_text(&self.detailed_explanation)
            || has_text(&self.recommended_action)
            || self
                .urgency_level
                .as_deref()
                .and_then(UrgencyTier::from_label)
                .is_some()
    }
}

/// The two reply shapes the completion API can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionReply {
    Structured(StructuredAnalysis),
    FreeText(String),
}

/// Normalized output of the completion stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub analysis: AnalysisRecord,
    pub detailed_explanation: String,
    pub conversation_context: String,
}

impl CompletionReply {
    /// Single parse attempt; anything that is not a usable analysis object is free text.
    ///
    /// An unusable JSON object is cut out of the free text, so raw JSON never
    /// reaches the explanation.
    pub fn parse(content: &str) -> Self {
        let Some(candidate) = isolate_json_object(content) else {
            return CompletionReply::FreeText(content.trim().to_string());
        };

        match serde_json::from_str::<StructuredAnalysis>(&candidate) {
            Ok(structured) if structured.is_meaningful() => CompletionReply::Structured(structured),
            _ => CompletionReply::FreeText(prose_around(content, &candidate)),
        }
    }

    pub fn into_outcome(self, ctx: &AnalysisContext<'_>) -> CompletionOutcome {
        match self {
            CompletionReply::Structured(structured) => structured_outcome(structured, ctx),
            CompletionReply::FreeText(text) => free_text_outcome(text, ctx),
        }
    }
}

impl CompletionOutcome {
    /// Outcome used when the completion API is unconfigured or fails.
    pub fn fallback(ctx: &AnalysisContext<'_>) -> Self {
        Self {
            analysis: AnalysisRecord::synthesized(&ctx.symptom_text(), ctx.urgency),
            detailed_explanation: templated_explanation(ctx.urgency),
            conversation_context: ctx.default_context(),
        }
    }
}

fn structured_outcome(structured: StructuredAnalysis, ctx: &AnalysisContext<'_>) -> CompletionOutcome {
    // the model may escalate the keyword tier but never lower it
    let urgency = structured
        .urgency_level
        .as_deref()
        .and_then(UrgencyTier::from_label)
        .map_or(ctx.urgency, |model_tier| model_tier.max(ctx.urgency));

    let analysis = AnalysisRecord::normalized(
        structured.possible_conditions,
        urgency,
        structured.recommended_action,
        structured.home_remedies,
        structured.when_to_see_doctor,
        structured.disclaimer,
        &ctx.symptom_text(),
    );

    CompletionOutcome {
        analysis,
        detailed_explanation: structured
            .detailed_explanation
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| templated_explanation(urgency)),
        conversation_context: structured
            .conversation_context
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| ctx.default_context()),
    }
}

fn free_text_outcome(text: String, ctx: &AnalysisContext<'_>) -> CompletionOutcome {
    let symptom_text = ctx.symptom_text();

    let mut conditions = hedged_conditions(&text);
    if conditions.is_empty() {
        conditions = medical_tables::conditions_for(&symptom_text);
    }

    let remedies = if ctx.urgency.allows_home_remedies() {
        medical_tables::remedies_for(&symptom_text)
    } else {
        Vec::new()
    };

    let analysis = AnalysisRecord::normalized(
        conditions,
        ctx.urgency,
        None,
        remedies,
        Vec::new(),
        None,
        &symptom_text,
    );

    let detailed_explanation = if text.is_empty() {
        templated_explanation(ctx.urgency)
    } else {
        text
    };

    CompletionOutcome {
        analysis,
        detailed_explanation,
        conversation_context: ctx.default_context(),
    }
}

/// `content` with the JSON candidate and any code fences removed.
fn prose_around(content: &str, candidate: &str) -> String {
    content
        .replacen(candidate, " ", 1)
        .replace("```json", " ")
        .replace("```", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Conditions named after hedging phrases such as "could be" or "such as".
fn hedged_conditions(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut conditions: Vec<String> = Vec::new();

    for caps in HEDGED_CONDITION.captures_iter(&lowered) {
        let Some(m) = caps.get(1) else { continue };
        let phrase = m.as_str().trim();
        let first_word = phrase.split_whitespace().next().unwrap_or_default();
        if NON_CONDITION_WORDS.contains(&first_word) {
            continue;
        }
        let condition = capitalize(phrase);
        if !conditions.contains(&condition) {
            conditions.push(condition);
        }
        if conditions.len() >= MAX_CONDITIONS {
            break;
        }
    }
    conditions
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
