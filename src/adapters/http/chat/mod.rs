//! Chat HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionResponse, DeleteSessionResponse, ErrorResponse, ReplyKind, SendMessageRequest,
    SendMessageResponse, SessionResponse,
};
pub use handlers::ChatAppState;
pub use routes::routes;
