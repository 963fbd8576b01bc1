//! Client side of the question-answering backend.
//!
//! Both the gateway's proxy route and the terminal chat reach the backend
//! through [`QueryBackend`], so tests can swap in a fake.

pub mod error;
pub mod http;

pub use error::BackendError;
pub use http::HttpBackend;

use async_trait::async_trait;
use sarthi_core::Query;
use serde_json::Value;

/// Common interface for anything that can answer a [`Query`].
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Send one query and return the backend's JSON body untouched.
    ///
    /// The body is always an object or an array. Single attempt; no retry.
    async fn query(&self, query: &Query) -> Result<Value, BackendError>;
}
