//! Regex-based extraction of symptom phrases from free text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Longest phrase kept from a complaint clause; longer captures are noise.
const MAX_PHRASE_CHARS: usize = 60;

const LEADING_FILLERS: &[&str] = &["a ", "an ", "the ", "my ", "some ", "really ", "very "];

/// Ordered pattern list. Capture group 1 is the phrase.
static SYMPTOM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // first-person complaint clauses, up to the next clause boundary
        r"\bi(?:'m| am)? (?:have|having|feel|feeling|experiencing|suffer from|suffering from|got)\s+([a-z][a-z' -]*?)(?:\s+(?:and|but|with|since|for|after|when|because|that)\b|[,.;:!?\n]|$)",
        r"\b(pain in (?:my |the )?[a-z]+)",
        r"\b(headaches?|migraines?|fever|chills|cough(?:ing)?|sore throat|runny nose|congestion|nausea|vomiting|diarrhea|constipation|dizz(?:y|iness)|fatigue|tiredness|insomnia|rash|itching|hives|chest pain|back pain|stomach ?ache|abdominal pain|shortness of breath|blurr(?:y|ed) vision|numbness|tingling|swelling|bleeding|cramps?|earache|toothache|anxiety|palpitations)\b",
        r"\b(can(?:'t|not) [a-z]+)",
        r"\b((?:swollen|inflamed|sore|stiff|itchy) [a-z]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("symptom pattern is a valid regex"))
    .collect()
});

/// Pulls candidate symptom phrases out of a user's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomExtractor;

impl SymptomExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns every distinct phrase matched by any pattern.
    ///
    /// Never fails; an input with no recognizable complaint yields an empty set.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");

        SYMPTOM_PATTERNS
            .iter()
            .flat_map(|re| re.captures_iter(&normalized))
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| clean_phrase(m.as_str()))
            .collect()
    }
}

fn clean_phrase(raw: &str) -> Option<String> {
    let mut phrase = raw.trim().trim_end_matches(|c: char| !c.is_alphanumeric());

    let mut stripped = true;
    while stripped {
        stripped = false;
        for filler in LEADING_FILLERS {
            if let Some(rest) = phrase.strip_prefix(filler) {
                phrase = rest.trim_start();
                stripped = true;
            }
        }
    }

    if phrase.is_empty() || phrase.chars().count() > MAX_PHRASE_CHARS {
        return None;
    }
    Some(phrase.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> BTreeSet<String> {
        SymptomExtractor::new().extract(text)
    }

    #[test]
    fn no_match_returns_empty_set() {
        assert!(extract("What is the weather like tomorrow?").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn extracts_from_clause_and_tokens() {
        let symptoms = extract("I have a headache and I'm having chest pain");
        assert!(symptoms.contains("headache"));
        assert!(symptoms.contains("chest pain"));
    }

    #[test]
    fn complaint_clause_keeps_qualifiers() {
        let symptoms = extract("I have a severe headache and blurry vision");
        assert!(symptoms.contains("severe headache"));
        assert!(symptoms.contains("headache"));
        assert!(symptoms.contains("blurry vision"));
    }

    #[test]
    fn duplicates_collapse() {
        let symptoms = extract("fever, fever and more fever");
        assert_eq!(symptoms.iter().filter(|s| *s == "fever").count(), 1);
    }

    #[test]
    fn pain_in_pattern_matches() {
        let symptoms = extract("There is a sharp pain in my knee");
        assert!(symptoms.contains("pain in my knee"));
    }

    #[test]
    fn cant_pattern_matches() {
        let symptoms = extract("I can't sleep at night");
        assert!(symptoms.contains("can't sleep"));
    }

    #[test]
    fn inflammation_pattern_matches() {
        let symptoms = extract("I woke up with a swollen ankle and a stiff neck");
        assert!(symptoms.contains("stiff neck"));
        assert!(symptoms.contains("swollen ankle"));
    }

    #[test]
    fn typographic_apostrophe_is_normalized() {
        let symptoms = extract("I\u{2019}m having nausea");
        assert!(symptoms.contains("nausea"));
    }

    #[test]
    fn phrases_are_trimmed() {
        for phrase in extract("I feel dizzy!  And I have a cough.") {
            assert_eq!(phrase, phrase.trim());
            assert!(!phrase.ends_with('.'));
        }
    }
}
