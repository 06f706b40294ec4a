//! Chat Command and Query Handlers
//!
//! ## Pipeline stages
//! - `SourceSearchService` - Rate-limited source search with static fallback
//! - `SymptomAnalyzer` - Completion call and reply normalization
//! - `ConversationOrchestrator` - Runs one message through every stage
//!
//! ## Commands
//! - `StartSession` - Open an empty session
//! - `SendMessage` - Answer a message and append the exchange
//! - `EndSession` - Discard a session
//!
//! ## Queries
//! - `GetSession` - Snapshot of a session's turns

mod analyze_symptoms;
mod end_session;
mod get_session;
mod handle_turn;
mod search_sources;
mod send_message;
mod start_session;

pub use analyze_symptoms::{AnalysisRequest, AnalyzerSettings, SymptomAnalyzer};
pub use end_session::{EndSessionCommand, EndSessionError, EndSessionHandler};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery};
pub use handle_turn::{ConversationOrchestrator, HandledTurn};
pub use search_sources::{
    SearchSettings, SourceOrigin, SourceSearchOutcome, SourceSearchService, MAX_QUERY_CHARS,
};
pub use send_message::{SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult};
pub use start_session::{StartSessionError, StartSessionHandler, StartSessionResult};
