//! SendMessageHandler - Answer a user message and append the exchange

use std::sync::Arc;

use crate::domain::conversation::{ConversationTurn, TurnResponse};
use crate::domain::foundation::{SessionId, ValidationError};
use crate::ports::{SessionStore, SessionStoreError};

use super::handle_turn::{ConversationOrchestrator, HandledTurn};

/// Command to send a message in a session
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Result of sending a message
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub response: TurnResponse,
    /// Turns in the session after this exchange was appended.
    pub turn_count: usize,
}

/// Error type for sending messages
#[derive(Debug, thiserror::Error)]
pub enum SendMessageError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<SessionStoreError> for SendMessageError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SendMessageError::NotFound(id),
            other => SendMessageError::Storage(other.to_string()),
        }
    }
}

/// Handler for user messages
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<ConversationOrchestrator>,
}

impl SendMessageHandler {
    pub fn new(store: Arc<dyn SessionStore>, orchestrator: Arc<ConversationOrchestrator>) -> Self {
        Self { store, orchestrator }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        // 1. Validate before touching the session
        ConversationTurn::validate_content(&cmd.message)?;

        // 2. Lock the session for the whole turn
        let shared = self.store.get(cmd.session_id).await?;
        let mut session = shared.lock().await;

        // 3. Run the pipeline against the history so far
        let HandledTurn { response, symptoms } = self
            .orchestrator
            .handle_turn(&cmd.message, session.turns(), Some(cmd.session_id))
            .await;

        // 4. Append user turn then assistant turn
        let symptoms: Vec<String> = symptoms.into_iter().collect();
        let user_turn = ConversationTurn::user(
            cmd.message,
            (!symptoms.is_empty()).then_some(symptoms),
        )?;
        let assistant_turn = match response.query_result() {
            Some(result) => ConversationTurn::assistant(
                result.formatted_text.clone(),
                Some(result.sources.clone()),
                Some(result.analysis.urgency_tier),
            ),
            None => ConversationTurn::assistant(response.formatted_text(), None, None),
        };
        session.record_exchange(user_turn, assistant_turn);

        Ok(SendMessageResult {
            response,
            turn_count: session.turn_count(),
        })
    }
}
