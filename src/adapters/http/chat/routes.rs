//! Route definitions for chat endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{end_session, get_session, health, send_message, start_session, ChatAppState};

/// Create chat router with all endpoints
///
/// # Endpoints
///
/// - `GET /health` - Liveness probe
/// - `POST /chat/sessions` - Start new session
/// - `GET /chat/sessions/{session_id}` - Get session history
/// - `POST /chat/sessions/{session_id}/messages` - Send message
/// - `DELETE /chat/sessions/{session_id}` - End session
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/chat/sessions", post(start_session))
        .route(
            "/chat/sessions/:session_id",
            get(get_session).delete(end_session),
        )
        .route("/chat/sessions/:session_id/messages", post(send_message))
}
