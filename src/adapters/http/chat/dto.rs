//! HTTP DTOs for chat endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::QueryResult;
use crate::domain::conversation::{ConversationSession, ConversationTurn, TurnResponse};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a message in a session
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for starting a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Kind of reply a message produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    SmallTalk,
    Analysis,
}

/// Response for sending a message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub kind: ReplyKind,
    pub formatted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>,
    pub turn_count: usize,
}

impl SendMessageResponse {
    pub fn from_turn(response: TurnResponse, turn_count: usize) -> Self {
        match response {
            TurnResponse::Canned { text, .. } => Self {
                kind: ReplyKind::SmallTalk,
                formatted_text: text,
                result: None,
                turn_count,
            },
            TurnResponse::Analyzed(result) => Self {
                kind: ReplyKind::Analysis,
                formatted_text: result.formatted_text.clone(),
                result: Some(result),
                turn_count,
            },
        }
    }
}

/// Response for reading a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub created_at: Timestamp,
    pub turns: Vec<ConversationTurn>,
}

impl From<ConversationSession> for SessionResponse {
    fn from(session: ConversationSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            created_at: *session.created_at(),
            turns: session.turns().to_vec(),
        }
    }
}

/// Response for successful delete
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSessionResponse {
    pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
