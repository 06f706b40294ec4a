//! Analysis module - The display schema produced for every analyzed turn.
//!
//! - `record` - `AnalysisRecord` and the `QueryResult` aggregate
//! - `completion_reply` - Parsing of completion API output into a tagged variant
//! - `formatter` - Markdown rendering of a `QueryResult`

mod completion_reply;
mod formatter;
mod json_extract;
mod record;

pub use completion_reply::{AnalysisContext, CompletionOutcome, CompletionReply, StructuredAnalysis};
pub use formatter::ResponseFormatter;
pub use record::{AnalysisRecord, QueryResult};
