//! SymptomAnalyzer - Completion stage of the turn pipeline.
//!
//! Builds the fixed system prompt, makes one completion call and normalizes
//! whatever comes back. Any failure yields the table-driven fallback.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;

use crate::domain::analysis::{AnalysisContext, CompletionOutcome, CompletionReply};
use crate::domain::conversation::{ConversationTurn, TurnRole};
use crate::domain::foundation::{SessionId, TurnId};
use crate::domain::sources::{SourceRecord, MAX_SOURCES};
use crate::domain::triage::UrgencyTier;
use crate::ports::{AIProvider, CompletionRequest, FinishReason, MessageRole, RequestMetadata};

/// Tunables for the completion stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Most recent history turns quoted in the prompt.
    pub history_turns: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1000,
            history_turns: 4,
        }
    }
}

/// Everything the completion stage needs for one turn.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub user_query: &'a str,
    pub symptoms: &'a BTreeSet<String>,
    pub urgency: UrgencyTier,
    pub sources: &'a [SourceRecord],
    pub history: &'a [ConversationTurn],
    pub session_id: Option<SessionId>,
}

impl<'a> AnalysisRequest<'a> {
    fn context(&self) -> AnalysisContext<'a> {
        AnalysisContext {
            user_query: self.user_query,
            symptoms: self.symptoms,
            urgency: self.urgency,
        }
    }
}

const SAFETY_RULES: &str = "You are a careful health information assistant. You are not a doctor \
and you never give a diagnosis.\n\
Rules:\n\
- Describe possible conditions only as possibilities, never as certainties.\n\
- Always recommend professional medical care when symptoms are serious, persistent or worsening.\n\
- For emergency symptoms, tell the user to call emergency services immediately.\n\
- Only suggest home remedies for low or moderate urgency.\n\
- Never recommend prescription drugs or dosages.";

const RESPONSE_SHAPE: &str = r#"Respond with a single JSON object and nothing else, using this shape:
{
  "possibleConditions": ["up to 4 possible conditions"],
  "urgencyLevel": "low | moderate | high | emergency",
  "recommendedAction": "one sentence",
  "homeRemedies": ["only for low or moderate urgency"],
  "whenToSeeDoctor": ["warning signs"],
  "detailedExplanation": "a short plain-language explanation",
  "conversationContext": "one sentence summarizing the conversation so far",
  "disclaimer": "a short medical disclaimer"
}"#;

/// Completion stage. Never fails.
pub struct SymptomAnalyzer {
    provider: Option<Arc<dyn AIProvider>>,
    settings: AnalyzerSettings,
}

impl SymptomAnalyzer {
    /// `provider` is `None` when no completion credential is configured.
    pub fn new(provider: Option<Arc<dyn AIProvider>>, settings: AnalyzerSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn analyze(&self, request: AnalysisRequest<'_>) -> CompletionOutcome {
        let ctx = request.context();

        let Some(provider) = self.provider.as_ref() else {
            tracing::debug!("completion provider not configured; using synthesized analysis");
            return CompletionOutcome::fallback(&ctx);
        };

        let completion = CompletionRequest::new(RequestMetadata::new(
            request.session_id,
            TurnId::new().to_string(),
        ))
        .with_system_prompt(self.build_system_prompt(&request))
        .with_message(MessageRole::User, request.user_query)
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);
        let trace_id = completion.metadata.trace_id.clone();

        let info = provider.provider_info();
        tracing::debug!(%trace_id, provider = %info.name, model = %info.model, "requesting completion");

        match provider.complete(completion).await {
            Ok(response) => {
                tracing::debug!(
                    %trace_id,
                    model = %response.model,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    total_tokens = response.usage.total_tokens,
                    "completion received"
                );
                if response.finish_reason == FinishReason::Length {
                    tracing::warn!(%trace_id, max_tokens = self.settings.max_tokens, "completion truncated");
                }

                let reply = CompletionReply::parse(&response.content);
                if matches!(reply, CompletionReply::FreeText(_)) {
                    tracing::debug!(%trace_id, "completion reply was free text");
                }
                reply.into_outcome(&ctx)
            }
            Err(err) => {
                tracing::warn!(%trace_id, error = %err, "completion failed; using synthesized analysis");
                CompletionOutcome::fallback(&ctx)
            }
        }
    }

    fn build_system_prompt(&self, request: &AnalysisRequest<'_>) -> String {
        let mut prompt = String::from(SAFETY_RULES);

        let recent_start = request.history.len().saturating_sub(self.settings.history_turns);
        let recent = &request.history[recent_start..];
        if !recent.is_empty() {
            prompt.push_str("\n\nRecent conversation:");
            for turn in recent {
                let speaker = match turn.role() {
                    TurnRole::User => "User",
                    TurnRole::Assistant => "Assistant",
                };
                let _ = write!(prompt, "\n{}: {}", speaker, turn.content());
            }
        }

        prompt.push_str("\n\nSymptoms identified: ");
        if request.symptoms.is_empty() {
            prompt.push_str("none identified");
        } else {
            prompt.push_str(&request.symptoms.iter().cloned().collect::<Vec<_>>().join(", "));
        }

        let _ = write!(prompt, "\nKeyword urgency assessment: {}", request.urgency);

        if !request.sources.is_empty() {
            prompt.push_str("\n\nReference sources:");
            for (i, source) in request.sources.iter().take(MAX_SOURCES).enumerate() {
                let _ = write!(
                    prompt,
                    "\n{}. {} ({}): {}",
                    i + 1,
                    source.title,
                    source.url,
                    source.description
                );
            }
        }

        prompt.push_str("\n\n");
        prompt.push_str(RESPONSE_SHAPE);
        prompt
    }
}
