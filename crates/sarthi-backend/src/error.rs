use thiserror::Error;

/// Failures talking to the backend. The `Display` text is what the proxy
/// relays to its callers in `{"error": ...}`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("Error: {status_text}")]
    UpstreamHttp {
        status: u16,
        /// Canonical reason phrase, or the bare code when there is none.
        status_text: String,
        body: String,
    },

    /// The body was not JSON, or was a JSON scalar (null, bool, number, string).
    #[error("Invalid response format from backend")]
    UpstreamFormat { detail: String },

    /// Timeout, DNS, refused or reset connection, or a broken body stream.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl BackendError {
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::UpstreamHttp { .. } => "UPSTREAM_HTTP_ERROR",
            BackendError::UpstreamFormat { .. } => "UPSTREAM_FORMAT_ERROR",
            BackendError::Network(_) => "NETWORK_ERROR",
        }
    }
}
