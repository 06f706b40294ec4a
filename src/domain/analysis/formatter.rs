//! Markdown rendering of a QueryResult.

use std::fmt::Write;

use crate::domain::triage::UrgencyTier;

use super::QueryResult;

/// Number of sources listed in the rendered reply.
const SOURCES_SHOWN: usize = 3;

/// Renders a [`QueryResult`] into the chat reply text.
///
/// Section order is fixed: urgency banner, explanation, possible conditions,
/// recommended action, home remedies, when to see a doctor, sources, and the
/// disclaimer last. Empty sections are left out.
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn format(result: &QueryResult) -> String {
        let analysis = &result.analysis;
        let mut sections: Vec<String> = Vec::new();

        if let Some(banner) = banner(analysis.urgency_tier) {
            sections.push(banner.to_string());
        }

        if !result.detailed_explanation.is_empty() {
            sections.push(result.detailed_explanation.clone());
        }

        if !analysis.possible_conditions.is_empty() {
            sections.push(bulleted("**Possible conditions:**", &analysis.possible_conditions));
        }

        if !analysis.recommended_action.is_empty() {
            sections.push(format!(
                "**Recommended action:** {}",
                analysis.recommended_action
            ));
        }

        if !analysis.home_remedies.is_empty() {
            sections.push(bulleted("**Home remedies:**", &analysis.home_remedies));
        }

        if !analysis.when_to_see_doctor.is_empty() {
            sections.push(bulleted(
                "**When to see a doctor:**",
                &analysis.when_to_see_doctor,
            ));
        }

        if !result.sources.is_empty() {
            let mut block = String::from("**Sources:**");
            for (i, source) in result.sources.iter().take(SOURCES_SHOWN).enumerate() {
                let _ = write!(
                    block,
                    "\n{}. [{}]({}) - {}",
                    i + 1,
                    source.title,
                    source.url,
                    source.category.label()
                );
            }
            sections.push(block);
        }

        sections.push(format!("**Disclaimer:** {}", analysis.disclaimer));

        sections.join("\n\n")
    }
}

fn banner(tier: UrgencyTier) -> Option<&'static str> {
    match tier {
        UrgencyTier::Emergency => Some(
            "**EMERGENCY:** Your symptoms may need immediate medical attention. \
             Call 911 or your local emergency number now.",
        ),
        UrgencyTier::High => Some(
            "**HIGH URGENCY:** Please seek medical care promptly.",
        ),
        UrgencyTier::Moderate | UrgencyTier::Low => None,
    }
}

fn bulleted(heading: &str, items: &[String]) -> String {
    let mut block = heading.to_string();
    for item in items {
        let _ = write!(block, "\n- {item}");
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AnalysisRecord, QueryResult};
    use crate::domain::sources::fallback_sources;
    use crate::domain::triage::medical_tables::DISCLAIMER;

    fn result_for(tier: UrgencyTier, symptoms: &str) -> QueryResult {
        QueryResult::assemble(
            AnalysisRecord::synthesized(symptoms, tier),
            "Here is what I found.".to_string(),
            fallback_sources(),
            vec![],
            String::new(),
        )
    }

    #[test]
    fn disclaimer_is_the_final_section() {
        for tier in [
            UrgencyTier::Low,
            UrgencyTier::Moderate,
            UrgencyTier::High,
            UrgencyTier::Emergency,
        ] {
            let text = ResponseFormatter::format(&result_for(tier, "headache"));
            assert!(text.ends_with(DISCLAIMER), "tier {tier}");
        }
    }

    #[test]
    fn home_remedies_omitted_when_empty() {
        let text = ResponseFormatter::format(&result_for(UrgencyTier::High, "headache"));
        assert!(!text.contains("Home remedies"));
    }

    #[test]
    fn home_remedies_present_for_low_urgency() {
        let text = ResponseFormatter::format(&result_for(UrgencyTier::Low, "headache"));
        assert!(text.contains("**Home remedies:**\n- Rest in a quiet, dark room"));
    }

    #[test]
    fn banner_only_for_high_and_emergency() {
        let emergency = ResponseFormatter::format(&result_for(UrgencyTier::Emergency, ""));
        assert!(emergency.starts_with("**EMERGENCY:**"));

        let high = ResponseFormatter::format(&result_for(UrgencyTier::High, ""));
        assert!(high.starts_with("**HIGH URGENCY:**"));

        let moderate = ResponseFormatter::format(&result_for(UrgencyTier::Moderate, ""));
        assert!(moderate.starts_with("Here is what I found."));
    }

    #[test]
    fn at_most_three_sources_listed() {
        let text = ResponseFormatter::format(&result_for(UrgencyTier::Low, ""));
        assert!(text.contains("\n3. ["));
        assert!(!text.contains("\n4. ["));
        assert!(text.contains("- Government Health"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = ResponseFormatter::format(&result_for(UrgencyTier::Low, "headache"));
        let order = [
            "Here is what I found.",
            "**Possible conditions:**",
            "**Recommended action:**",
            "**Home remedies:**",
            "**When to see a doctor:**",
            "**Sources:**",
            "**Disclaimer:**",
        ];
        let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
