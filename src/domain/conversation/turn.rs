//! ConversationTurn entity.
//!
//! Turns are immutable records of one user or assistant message. Symptoms
//! are attached to user turns; sources and urgency to assistant turns.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::sources::SourceRecord;
use crate::domain::triage::UrgencyTier;

/// Longest user message accepted for analysis.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Who sent a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// An immutable message within a session.
///
/// # Invariants
///
/// - `content` is non-empty
/// - `timestamp` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    role: TurnRole,
    content: String,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    symptoms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<SourceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    urgency: Option<UrgencyTier>,
}

impl ConversationTurn {
    /// Creates a user turn.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    /// - `TooLong` if content exceeds [`MAX_MESSAGE_CHARS`]
    pub fn user(
        content: impl Into<String>,
        symptoms: Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            role: TurnRole::User,
            content,
            timestamp: Timestamp::now(),
            symptoms,
            sources: None,
            urgency: None,
        })
    }

    /// Creates an assistant turn.
    pub fn assistant(
        content: impl Into<String>,
        sources: Option<Vec<SourceRecord>>,
        urgency: Option<UrgencyTier>,
    ) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp: Timestamp::now(),
            symptoms: None,
            sources,
            urgency,
        }
    }

    /// Checks a raw user message before any processing happens.
    pub fn validate_content(content: &str) -> Result<(), ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        let chars = content.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(ValidationError::too_long("message", MAX_MESSAGE_CHARS, chars));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn symptoms(&self) -> Option<&[String]> {
        self.symptoms.as_deref()
    }

    pub fn sources(&self) -> Option<&[SourceRecord]> {
        self.sources.as_deref()
    }

    pub fn urgency(&self) -> Option<UrgencyTier> {
        self.urgency
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}
