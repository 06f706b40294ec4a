//! HTTP handlers for chat endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::chat::{
    ConversationOrchestrator, EndSessionCommand, EndSessionError, EndSessionHandler,
    GetSessionError, GetSessionHandler, GetSessionQuery, SendMessageCommand, SendMessageError,
    SendMessageHandler, StartSessionError, StartSessionHandler,
};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::dto::{
    CreateSessionResponse, DeleteSessionResponse, ErrorResponse, SendMessageRequest,
    SendMessageResponse, SessionResponse,
};

type ErrorReply = (StatusCode, Json<ErrorResponse>);

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct ChatAppState {
    pub store: Arc<dyn SessionStore>,
    pub orchestrator: Arc<ConversationOrchestrator>,
}

impl ChatAppState {
    pub fn new(store: Arc<dyn SessionStore>, orchestrator: Arc<ConversationOrchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.store.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.store.clone(), self.orchestrator.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.store.clone())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.store.clone())
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ErrorReply> {
    SessionId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session id format")),
        )
    })
}

fn session_not_found(id: SessionId) -> ErrorReply {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Session", &id.to_string())),
    )
}

fn internal(msg: String) -> ErrorReply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(msg)),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Liveness probe
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Start a new chat session
///
/// POST /chat/sessions
pub async fn start_session(
    State(app_state): State<ChatAppState>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.start_session_handler();
    let result = handler.handle().await.map_err(|e| match e {
        StartSessionError::Storage(msg) => internal(msg),
    })?;

    let response = CreateSessionResponse {
        session_id: result.session_id.to_string(),
    };

    Ok::<_, ErrorReply>((StatusCode::CREATED, Json(response)))
}

/// Send a message in a session
///
/// POST /chat/sessions/{session_id}/messages
pub async fn send_message(
    State(app_state): State<ChatAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let cmd = SendMessageCommand {
        session_id,
        message: req.message,
    };

    let handler = app_state.send_message_handler();
    let result = handler.handle(cmd).await.map_err(|e| match e {
        SendMessageError::NotFound(id) => session_not_found(id),
        SendMessageError::Validation(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(err.to_string())),
        ),
        SendMessageError::Storage(msg) => internal(msg),
    })?;

    let response = SendMessageResponse::from_turn(result.response, result.turn_count);

    Ok::<_, ErrorReply>((StatusCode::OK, Json(response)))
}

/// Get a session's history
///
/// GET /chat/sessions/{session_id}
pub async fn get_session(
    State(app_state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.get_session_handler();
    let session = handler
        .handle(GetSessionQuery { session_id })
        .await
        .map_err(|e| match e {
            GetSessionError::NotFound(id) => session_not_found(id),
            GetSessionError::Storage(msg) => internal(msg),
        })?;

    Ok::<_, ErrorReply>((StatusCode::OK, Json(SessionResponse::from(session))))
}

/// End a session, discarding its history
///
/// DELETE /chat/sessions/{session_id}
pub async fn end_session(
    State(app_state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.end_session_handler();
    handler
        .handle(EndSessionCommand { session_id })
        .await
        .map_err(|e| match e {
            EndSessionError::NotFound(id) => session_not_found(id),
            EndSessionError::Storage(msg) => internal(msg),
        })?;

    let response = DeleteSessionResponse {
        message: "Session ended".to_string(),
    };

    Ok::<_, ErrorReply>((StatusCode::OK, Json(response)))
}
