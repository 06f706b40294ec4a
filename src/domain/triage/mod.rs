//! Triage module - Rule-based interpretation of raw user text.
//!
//! Everything here is pure and total: regex extraction of symptom phrases,
//! keyword-driven urgency classification, small-talk detection, and the
//! fixed lookup tables used to synthesize advice when no model output is
//! available.

pub mod medical_tables;
mod small_talk;
mod symptoms;
mod urgency;

pub use small_talk::SmallTalk;
pub use symptoms::SymptomExtractor;
pub use urgency::{UrgencyClassifier, UrgencyTier};
