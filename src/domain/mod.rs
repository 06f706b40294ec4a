//! Domain layer - Pure types and rules with no I/O.

pub mod analysis;
pub mod conversation;
pub mod foundation;
pub mod sources;
pub mod triage;
