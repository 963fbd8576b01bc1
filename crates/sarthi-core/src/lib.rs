pub mod config;
pub mod error;
pub mod types;

pub use error::{Result, SarthiError};
pub use types::{BackendReply, ChatMessage, MessageId, Query, Role};
