//! Proxy endpoint — POST /api/chat
//!
//! Validates the query, forwards it to the backend once, and relays the
//! backend's JSON verbatim.
//!
//! Request:  `{"query": "where do I pay property tax?"}`
//! Response: whatever object or array the backend returned, status 200
//! Error:    `{"error": "..."}` with 400 (bad input) or 500 (backend failure)

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use sarthi_core::{types::INVALID_QUERY_MESSAGE, Query, SarthiError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct ChatError {
    pub error: String,
}

type ErrorResponse = (StatusCode, Json<ChatError>);

/// POST /api/chat — single-attempt pass-through to the backend.
///
/// The body is read raw so that malformed JSON, or a body that cannot be
/// read at all, gets the same 400 envelope as a missing or blank `query`.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let body = body.map_err(|e| {
        debug!(error = %e, "unreadable chat request body");
        error_response(StatusCode::BAD_REQUEST, INVALID_QUERY_MESSAGE.to_string())
    })?;
    let query = parse_query(&body).map_err(|e| {
        debug!(code = e.code(), "rejected chat request");
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    match state.backend.query(&query).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            warn!(error = %e, code = e.code(), "POST /api/chat failed");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

fn parse_query(body: &[u8]) -> Result<Query, SarthiError> {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    Query::from_json(&value)
}

fn error_response(status: StatusCode, error: String) -> ErrorResponse {
    (status, Json(ChatError { error }))
}
