//! ConversationOrchestrator - Runs one user message through the pipeline.
//!
//! small talk? -> extract -> classify -> search -> complete -> assemble
//!
//! The pipeline always answers: a panic anywhere inside it is caught here and
//! replaced by the technical-difficulty result.

use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;

use crate::domain::analysis::QueryResult;
use crate::domain::conversation::{ConversationTurn, TurnResponse};
use crate::domain::foundation::SessionId;
use crate::domain::triage::{SmallTalk, SymptomExtractor, UrgencyClassifier};

use super::analyze_symptoms::{AnalysisRequest, SymptomAnalyzer};
use super::search_sources::SourceSearchService;

/// Reply to one message plus the symptom phrases found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledTurn {
    pub response: TurnResponse,
    pub symptoms: BTreeSet<String>,
}

/// Sequences the pipeline stages for a single turn.
pub struct ConversationOrchestrator {
    extractor: SymptomExtractor,
    classifier: UrgencyClassifier,
    search: SourceSearchService,
    analyzer: SymptomAnalyzer,
}

impl ConversationOrchestrator {
    pub fn new(search: SourceSearchService, analyzer: SymptomAnalyzer) -> Self {
        Self {
            extractor: SymptomExtractor::new(),
            classifier: UrgencyClassifier::new(),
            search,
            analyzer,
        }
    }

    pub async fn handle_turn(
        &self,
        user_query: &str,
        history: &[ConversationTurn],
        session_id: Option<SessionId>,
    ) -> HandledTurn {
        if let Some(kind) = SmallTalk::detect(user_query) {
            tracing::info!(?kind, "answered small talk");
            return HandledTurn {
                response: TurnResponse::canned(kind),
                symptoms: BTreeSet::new(),
            };
        }

        let symptoms = self.extractor.extract(user_query);
        let started = Instant::now();
        tracing::info!(session_id = ?session_id, history_len = history.len(), "turn started");

        let result = match AssertUnwindSafe(self.run_pipeline(user_query, &symptoms, history, session_id))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(%reason, "turn pipeline panicked");
                QueryResult::technical_difficulty()
            }
        };

        tracing::info!(
            urgency = %result.analysis.urgency_tier,
            sources = result.sources.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "turn finished"
        );
        HandledTurn {
            response: TurnResponse::Analyzed(result),
            symptoms,
        }
    }

    async fn run_pipeline(
        &self,
        user_query: &str,
        symptoms: &BTreeSet<String>,
        history: &[ConversationTurn],
        session_id: Option<SessionId>,
    ) -> QueryResult {
        let urgency = self.classifier.classify(user_query);
        tracing::debug!(symptoms = symptoms.len(), %urgency, "triaged message");

        let sources = self.search.search(symptoms, user_query).await;

        let outcome = self
            .analyzer
            .analyze(AnalysisRequest {
                user_query,
                symptoms,
                urgency,
                sources: &sources.results,
                history,
                session_id,
            })
            .await;

        QueryResult::assemble(
            outcome.analysis,
            outcome.detailed_explanation,
            sources.results,
            sources.related_topics,
            outcome.conversation_context,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::clock::ManualClock;
    use crate::adapters::search::MockSearchProvider;
    use crate::application::handlers::chat::{AnalyzerSettings, SearchSettings};
    use crate::domain::sources::fallback_sources;
    use crate::domain::triage::UrgencyTier;
    use std::sync::Arc;

    fn orchestrator(ai: &MockAIProvider, search: &MockSearchProvider) -> ConversationOrchestrator {
        ConversationOrchestrator::new(
            SourceSearchService::new(
                Some(Arc::new(search.clone())),
                Arc::new(ManualClock::starting_at(0)),
                SearchSettings::default(),
            ),
            SymptomAnalyzer::new(Some(Arc::new(ai.clone())), AnalyzerSettings::default()),
        )
    }

    #[tokio::test]
    async fn small_talk_makes_no_external_calls() {
        let ai = MockAIProvider::new();
        let search = MockSearchProvider::new();

        let response = orchestrator(&ai, &search)
            .handle_turn("thanks", &[], None)
            .await
            .response;

        assert_eq!(response, TurnResponse::canned(SmallTalk::Thanks));
        assert!(response.formatted_text().starts_with("You're welcome"));
        assert_eq!(ai.call_count(), 0);
        assert_eq!(search.call_count(), 0);
    }

    #[tokio::test]
    async fn handled_turn_reports_extracted_symptoms() {
        let ai = MockAIProvider::new();
        let search = MockSearchProvider::new();
        let orchestrator = orchestrator(&ai, &search);

        let analyzed = orchestrator
            .handle_turn("I have a headache and a fever", &[], None)
            .await;
        let small_talk = orchestrator.handle_turn("hello", &[], None).await;

        assert_eq!(
            analyzed.symptoms.into_iter().collect::<Vec<_>>(),
            vec!["fever".to_string(), "headache".to_string()]
        );
        assert!(small_talk.symptoms.is_empty());
    }

    #[tokio::test]
    async fn symptom_with_greeting_is_analyzed() {
        let ai = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let search = MockSearchProvider::new().with_network_error("down");

        let response = orchestrator(&ai, &search)
            .handle_turn("hi, I have chest pain", &[], None)
            .await
            .response;

        let result = response.query_result().expect("analyzed");
        assert_eq!(result.analysis.urgency_tier, UrgencyTier::Emergency);
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn both_stages_failing_still_flags_high_urgency() {
        let ai = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "503".into(),
        });
        let search = MockSearchProvider::new().with_malformed_payload("not json");

        let response = orchestrator(&ai, &search)
            .handle_turn("I have a severe headache and blurry vision", &[], None)
            .await
            .response;

        let result = response.query_result().expect("analyzed");
        assert!(result.analysis.urgency_tier >= UrgencyTier::High);
        assert_eq!(result.sources, fallback_sources());
        assert!(result.formatted_text.starts_with("**HIGH URGENCY:**"));
        assert!(result.analysis.home_remedies.is_empty());
    }

    #[tokio::test]
    async fn panic_in_pipeline_yields_technical_difficulty() {
        let ai = MockAIProvider::new().with_panic();
        let search = MockSearchProvider::new();

        let response = orchestrator(&ai, &search)
            .handle_turn("I have a mild cough", &[], None)
            .await
            .response;

        assert_eq!(
            response,
            TurnResponse::Analyzed(QueryResult::technical_difficulty())
        );
    }

    #[tokio::test]
    async fn structured_reply_flows_into_result() {
        let ai = MockAIProvider::new().with_response(
            r#"{"possibleConditions": ["Tension headache"], "urgencyLevel": "low",
                "detailedExplanation": "Often stress related.", "relatedTopics": []}"#,
        );
        let search = MockSearchProvider::new().with_urls(&[
            ("https://www.mayoclinic.org/headache", "Headache"),
            ("https://www.cdc.gov/headache", "CDC Headache"),
        ]);

        let response = orchestrator(&ai, &search)
            .handle_turn("I have a headache", &[], None)
            .await
            .response;

        let result = response.query_result().expect("analyzed");
        assert_eq!(result.analysis.possible_conditions, vec!["Tension headache"]);
        assert_eq!(result.sources[0].url, "https://www.cdc.gov/headache");
        assert_eq!(result.detailed_explanation, "Often stress related.");
    }
}
