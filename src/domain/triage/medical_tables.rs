//! Fixed lookup tables used to synthesize advice from symptoms alone.
//!
//! Keys are matched by substring against the lower-cased symptom text, so
//! "dizz" covers both "dizzy" and "dizziness".

/// Maximum number of conditions reported for a single turn.
pub const MAX_CONDITIONS: usize = 4;

/// Maximum number of home remedies reported for a single turn.
pub const MAX_REMEDIES: usize = 5;

pub const DISCLAIMER: &str = "This information is for educational purposes only and is not a \
    substitute for professional medical advice, diagnosis, or treatment. Always consult a \
    qualified healthcare provider about your symptoms. If you think you may have a medical \
    emergency, call your local emergency number immediately.";

pub const WHEN_TO_SEE_DOCTOR: &[&str] = &[
    "Symptoms last more than a few days or keep getting worse",
    "You develop a high fever, severe pain, or difficulty breathing",
    "New or unusual symptoms appear alongside the current ones",
    "You have a chronic condition, are pregnant, or are over 65",
];

const UNSPECIFIED_CONDITION: &str = "A condition that needs evaluation by a healthcare professional";

const CONDITION_TABLE: &[(&str, &[&str])] = &[
    (
        "chest pain",
        &[
            "Cardiac event (requires urgent evaluation)",
            "Muscle strain",
            "Acid reflux",
        ],
    ),
    ("headache", &["Tension headache", "Migraine", "Dehydration"]),
    ("migraine", &["Migraine", "Tension headache"]),
    ("fever", &["Viral infection", "Influenza", "Bacterial infection"]),
    ("cough", &["Common cold", "Bronchitis", "Allergies"]),
    ("sore throat", &["Pharyngitis", "Strep throat", "Common cold"]),
    (
        "dizz",
        &[
            "Vertigo or balance disorder",
            "Low blood pressure",
            "Inner ear infection",
        ],
    ),
    ("nausea", &["Gastroenteritis", "Food poisoning", "Migraine"]),
    ("vomit", &["Gastroenteritis", "Food poisoning"]),
    ("diarrhea", &["Gastroenteritis", "Food intolerance"]),
    ("stomach", &["Indigestion", "Gastritis", "Irritable bowel syndrome"]),
    ("abdominal", &["Indigestion", "Gastritis", "Appendicitis"]),
    ("rash", &["Contact dermatitis", "Allergic reaction", "Eczema"]),
    ("itch", &["Allergic reaction", "Dry skin", "Eczema"]),
    ("fatigue", &["Sleep deprivation", "Anemia", "Viral illness"]),
    ("tired", &["Sleep deprivation", "Anemia", "Thyroid imbalance"]),
    ("back", &["Muscle strain", "Poor posture", "Disc problem"]),
    ("breath", &["Asthma", "Respiratory infection", "Anxiety"]),
    (
        "vision",
        &["Eye strain", "Migraine with aura", "Blood pressure changes"],
    ),
    ("sleep", &["Insomnia", "Stress or anxiety", "Sleep apnea"]),
    ("anxiety", &["Generalized anxiety", "Panic attack", "Stress reaction"]),
    ("swollen", &["Inflammation", "Injury or sprain", "Fluid retention"]),
];

const REMEDY_TABLE: &[(&str, &[&str])] = &[
    (
        "headache",
        &[
            "Rest in a quiet, dark room",
            "Drink plenty of water",
            "Apply a cold compress to your forehead",
        ],
    ),
    (
        "fever",
        &[
            "Drink plenty of fluids",
            "Rest as much as possible",
            "Use a lukewarm compress",
        ],
    ),
    (
        "cough",
        &["Drink warm fluids with honey", "Use a humidifier", "Avoid smoke and irritants"],
    ),
    (
        "sore throat",
        &["Gargle with warm salt water", "Drink warm tea with honey"],
    ),
    (
        "nausea",
        &["Sip clear fluids slowly", "Eat small, bland meals", "Try ginger tea"],
    ),
    (
        "dizz",
        &["Sit or lie down until it passes", "Stand up slowly", "Stay hydrated"],
    ),
    ("stomach", &["Eat bland foods", "Avoid fatty or spicy meals"]),
    (
        "rash",
        &["Keep the area clean and dry", "Avoid scratching", "Use a fragrance-free moisturizer"],
    ),
    ("back", &["Apply heat or ice", "Gentle stretching", "Keep moving with light activity"]),
    ("sleep", &["Keep a regular sleep schedule", "Limit screens before bed"]),
    ("tired", &["Keep a regular sleep schedule", "Stay hydrated"]),
];

const GENERAL_REMEDIES: &[&str] = &[
    "Get adequate rest",
    "Stay hydrated",
    "Monitor your symptoms and note any changes",
];

/// Conditions associated with the given symptom text, deduplicated and capped.
///
/// Always returns at least one entry.
pub fn conditions_for(symptom_text: &str) -> Vec<String> {
    let mut conditions = lookup(CONDITION_TABLE, symptom_text, MAX_CONDITIONS);
    if conditions.is_empty() {
        conditions.push(UNSPECIFIED_CONDITION.to_string());
    }
    conditions
}

/// Self-care suggestions for the given symptom text, falling back to general advice.
pub fn remedies_for(symptom_text: &str) -> Vec<String> {
    let remedies = lookup(REMEDY_TABLE, symptom_text, MAX_REMEDIES);
    if remedies.is_empty() {
        return GENERAL_REMEDIES.iter().map(|r| r.to_string()).collect();
    }
    remedies
}

pub fn when_to_see_doctor() -> Vec<String> {
    WHEN_TO_SEE_DOCTOR.iter().map(|s| s.to_string()).collect()
}

fn lookup(table: &[(&str, &[&str])], symptom_text: &str, cap: usize) -> Vec<String> {
    let text = symptom_text.to_lowercase();
    let mut out: Vec<String> = Vec::new();

    for (key, values) in table {
        if !text.contains(key) {
            continue;
        }
        for value in *values {
            if out.len() >= cap {
                return out;
            }
            if !out.iter().any(|v| v == value) {
                out.push(value.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dizzy_maps_to_vertigo() {
        let conditions = conditions_for("dizzy");
        assert_eq!(conditions[0], "Vertigo or balance disorder");
    }

    #[test]
    fn unknown_symptoms_get_placeholder_condition() {
        let conditions = conditions_for("purple elbows");
        assert_eq!(conditions, vec![UNSPECIFIED_CONDITION.to_string()]);
    }

    #[test]
    fn conditions_are_capped_and_unique() {
        let conditions = conditions_for("headache fever cough nausea migraine");
        assert_eq!(conditions.len(), MAX_CONDITIONS);
        let mut deduped = conditions.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), conditions.len());
    }

    #[test]
    fn migraine_is_not_repeated() {
        let conditions = conditions_for("headache migraine");
        assert_eq!(
            conditions.iter().filter(|c| c.as_str() == "Migraine").count(),
            1
        );
    }

    #[test]
    fn remedies_fall_back_to_general_advice() {
        let remedies = remedies_for("purple elbows");
        assert_eq!(remedies.len(), GENERAL_REMEDIES.len());
    }

    #[test]
    fn remedies_match_symptoms() {
        let remedies = remedies_for("sore throat");
        assert!(remedies.contains(&"Gargle with warm salt water".to_string()));
    }

    #[test]
    fn boilerplate_is_populated() {
        assert_eq!(when_to_see_doctor().len(), WHEN_TO_SEE_DOCTOR.len());
        assert!(!DISCLAIMER.is_empty());
    }
}
