//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat completion service
//! - `SearchProvider` - Web search for source citations
//! - `Clock` - Wall-clock time for the search cooldown
//! - `SessionStore` - Live in-memory chat sessions

mod ai_provider;
mod clock;
mod search_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use clock::Clock;
pub use search_provider::{RawSearchHit, SearchError, SearchHits, SearchProvider, SearchQuery};
pub use session_store::{SessionStore, SessionStoreError, SharedSession};
