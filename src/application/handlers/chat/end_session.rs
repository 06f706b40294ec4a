//! EndSessionHandler - Discard a session and its history

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to end a session
#[derive(Debug, Clone, Copy)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

/// Error type for ending a session
#[derive(Debug, thiserror::Error)]
pub enum EndSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for EndSessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => EndSessionError::NotFound(id),
            other => EndSessionError::Storage(other.to_string()),
        }
    }
}

/// Handler for ending sessions
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), EndSessionError> {
        self.store.remove(cmd.session_id).await?;
        let live_sessions = self.store.len().await;
        tracing::info!(
            session_id = %cmd.session_id,
            live_sessions,
            "session ended"
        );
        Ok(())
    }
}
