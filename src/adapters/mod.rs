//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible completion client and a scripted mock
//! - `search` - RapidAPI web search client and a scripted mock
//! - `clock` - System and manually-advanced clocks
//! - `storage` - In-memory session store
//! - `http` - Axum REST API

pub mod ai;
pub mod clock;
pub mod http;
pub mod search;
pub mod storage;

#[cfg(test)]
mod test_support;
