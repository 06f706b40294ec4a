//! Conversation module - Append-only, in-memory chat history.
//!
//! A session owns an ordered list of immutable turns. Turns are only ever
//! appended in user/assistant pairs, and the whole session disappears when
//! it is ended.

mod response;
mod session;
mod turn;

pub use response::TurnResponse;
pub use session::ConversationSession;
pub use turn::{ConversationTurn, TurnRole};
