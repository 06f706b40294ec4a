//! ConversationSession aggregate.

use serde::Serialize;

use crate::domain::foundation::{SessionId, Timestamp};

use super::ConversationTurn;

/// In-memory chat session: an append-only sequence of turns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    id: SessionId,
    created_at: Timestamp,
    turns: Vec<ConversationTurn>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Timestamp::now(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Appends one user turn followed by its assistant reply.
    pub fn record_exchange(&mut self, user: ConversationTurn, assistant: ConversationTurn) {
        self.turns.push(user);
        self.turns.push(assistant);
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
