use async_trait::async_trait;
use sarthi_core::Query;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{BackendError, QueryBackend};

/// Outbound request body: `{"query": "<trimmed text>"}`.
#[derive(Serialize)]
struct QueryPayload<'a> {
    query: &'a str,
}

/// Backend reached over HTTP with a JSON POST.
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn query(&self, query: &Query) -> Result<Value, BackendError> {
        debug!(url = %self.url, "forwarding query to backend");

        let resp = self
            .client
            .post(&self.url)
            .json(&QueryPayload {
                query: query.as_str(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "failed to read backend error body");
                    String::new()
                }
            };
            warn!(status = status.as_u16(), body = %body, "error response from backend");
            return Err(BackendError::UpstreamHttp {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .map(String::from)
                    .unwrap_or_else(|| status.as_u16().to_string()),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        parse_body(&bytes)
    }
}

/// Accept a JSON object or array; a scalar or non-JSON body is a format error.
fn parse_body(bytes: &[u8]) -> Result<Value, BackendError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(body @ (Value::Object(_) | Value::Array(_))) => Ok(body),
        Ok(other) => {
            let detail = format!("expected a JSON object or array, got {}", kind(&other));
            warn!(%detail, "invalid response format from backend");
            Err(BackendError::UpstreamFormat { detail })
        }
        Err(e) => {
            warn!(error = %e, "backend body is not JSON");
            Err(BackendError::UpstreamFormat {
                detail: e.to_string(),
            })
        }
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let q = Query::parse("  Ward office timings ").unwrap();
        let v = serde_json::to_value(QueryPayload { query: q.as_str() }).unwrap();
        assert_eq!(v, serde_json::json!({"query": "Ward office timings"}));
    }

    #[test]
    fn parse_body_rejects_scalars_and_non_json() {
        for body in ["null", "\"ok\"", "3", "true", "false", "<html>", ""] {
            let err = parse_body(body.as_bytes()).unwrap_err();
            assert!(matches!(err, BackendError::UpstreamFormat { .. }), "{body}");
            assert_eq!(err.to_string(), "Invalid response format from backend");
        }
    }

    #[test]
    fn parse_body_keeps_fields_verbatim() {
        let body = parse_body(br#"{"success":true,"response":"Hi","sources":[1]}"#).unwrap();
        assert_eq!(body.as_object().map(|m| m.len()), Some(3));
        assert_eq!(body["sources"], serde_json::json!([1]));
    }

    #[test]
    fn parse_body_accepts_arrays() {
        let body = parse_body(br#"[{"success":true}]"#).unwrap();
        assert_eq!(body, serde_json::json!([{"success": true}]));
    }
}
