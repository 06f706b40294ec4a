//! What the orchestrator hands back for one user message.

use crate::domain::analysis::QueryResult;
use crate::domain::triage::SmallTalk;

/// Reply to a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResponse {
    /// Small talk answered with a canned reply; no analysis ran.
    Canned { kind: SmallTalk, text: String },
    /// Full pipeline output.
    Analyzed(QueryResult),
}

impl TurnResponse {
    pub fn canned(kind: SmallTalk) -> Self {
        TurnResponse::Canned {
            kind,
            text: kind.reply().to_string(),
        }
    }

    pub fn formatted_text(&self) -> &str {
        match self {
            TurnResponse::Canned { text, .. } => text,
            TurnResponse::Analyzed(result) => &result.formatted_text,
        }
    }

    pub fn query_result(&self) -> Option<&QueryResult> {
        match self {
            TurnResponse::Canned { .. } => None,
            TurnResponse::Analyzed(result) => Some(result),
        }
    }
}
