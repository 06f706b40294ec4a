//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps, and validation errors that the
//! triage, analysis, and conversation modules build on.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{SessionId, TurnId};
pub use timestamp::Timestamp;
