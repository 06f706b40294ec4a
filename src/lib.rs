//! Symptom Compass - Conversational symptom guide
//!
//! Each user message is classified for urgency, enriched with web sources,
//! and answered by a completion model under strict safety rules. Every
//! external stage has a deterministic fallback, so a turn always produces
//! a complete, disclaimed answer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
