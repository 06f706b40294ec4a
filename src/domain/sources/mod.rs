//! Sources module - Search results annotated with a trust category.

mod category;
mod fallback;
mod source_record;

pub use category::SourceCategory;
pub use fallback::{fallback_related_topics, fallback_sources};
pub use source_record::{rank_sources, SourceRecord, MAX_RELATED_TOPICS, MAX_SOURCES};
