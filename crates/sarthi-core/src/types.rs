use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::error::{Result, SarthiError};

/// Body of the 400 response when a query is missing, not a string, or blank.
pub const INVALID_QUERY_MESSAGE: &str = "Invalid input: query must be a non-empty string.";

/// A user question, trimmed of surrounding whitespace and never empty.
///
/// The only way to obtain a `Query` is through [`Query::parse`] or
/// [`Query::from_json`], so anything holding one may forward it upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Trim `raw` and reject it if nothing is left. Case and inner
    /// whitespace are preserved.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid_query());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Extract and validate the `query` field of a JSON request body.
    ///
    /// Fails when the body is not an object, the field is absent, or the
    /// field holds anything other than a non-blank string.
    pub fn from_json(body: &Value) -> Result<Self> {
        let raw = body
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(invalid_query)?;
        Self::parse(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid_query() -> SarthiError {
    SarthiError::InvalidInput(INVALID_QUERY_MESSAGE.to_string())
}

/// Unique identifier for a transcript entry (UUIDv7, so ids sort by creation time).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Bot => f.write_str("bot"),
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Bot,
            content: content.into(),
        }
    }
}

/// Interpretation of the backend's `{ "success": bool, "response"?: string }` body.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply {
    /// `success: true` with a string `response`.
    Answer { text: String },
    /// The backend reported failure: `success` false, null, or absent,
    /// or the body is an array rather than an object.
    Declined { raw: Value },
    /// The body claims success but cannot be used, or `success` has the wrong type.
    Malformed { reason: String },
}

impl BackendReply {
    pub fn from_value(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self::from_object(map),
            Value::Array(_) => BackendReply::Declined { raw: body.clone() },
            other => BackendReply::Malformed {
                reason: format!("body is not an object: {other}"),
            },
        }
    }

    fn from_object(body: &Map<String, Value>) -> Self {
        match body.get("success") {
            Some(Value::Bool(true)) => match body.get("response") {
                Some(Value::String(text)) => BackendReply::Answer { text: text.clone() },
                Some(other) => BackendReply::Malformed {
                    reason: format!("response is not a string: {other}"),
                },
                None => BackendReply::Malformed {
                    reason: "success without a response field".to_string(),
                },
            },
            Some(Value::Bool(false)) | Some(Value::Null) | None => BackendReply::Declined {
                raw: Value::Object(body.clone()),
            },
            Some(other) => BackendReply::Malformed {
                reason: format!("success is not a boolean: {other}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_trims_and_preserves_case() {
        let q = Query::parse("  Where is the Civic Centre?\n").unwrap();
        assert_eq!(q.as_str(), "Where is the Civic Centre?");
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let q = Query::parse("\tproperty   tax ").unwrap();
        assert_eq!(q.as_str(), "property   tax");
    }

    #[test]
    fn parse_rejects_blank() {
        for raw in ["", "   ", "\n\t", "\u{3000}"] {
            let err = Query::parse(raw).unwrap_err();
            assert_eq!(err.to_string(), INVALID_QUERY_MESSAGE);
            assert_eq!(err.code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn from_json_rejects_non_strings() {
        for body in [
            json!({}),
            json!({"query": null}),
            json!({"query": 42}),
            json!({"query": true}),
            json!({"query": ["a"]}),
            json!({"query": {"text": "a"}}),
            json!({"query": "  "}),
            json!("query"),
            json!([{"query": "a"}]),
        ] {
            assert!(Query::from_json(&body).is_err(), "accepted {body}");
        }
    }

    #[test]
    fn from_json_accepts_string_field() {
        let q = Query::from_json(&json!({"query": " water supply ", "extra": 1})).unwrap();
        assert_eq!(q.as_str(), "water supply");
    }

    #[test]
    fn query_serializes_as_plain_string() {
        let q = Query::parse(" hi ").unwrap();
        assert_eq!(serde_json::to_value(&q).unwrap(), json!("hi"));
    }

    #[test]
    fn chat_message_roles_serialize_lowercase() {
        let msg = ChatMessage::bot("Hello");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["role"], "bot");
        assert_eq!(v["content"], "Hello");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("same");
        let b = ChatMessage::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn reply_answer() {
        let reply = BackendReply::from_value(&json!({"success": true, "response": "Hello"}));
        assert_eq!(reply, BackendReply::Answer { text: "Hello".into() });
    }

    #[test]
    fn reply_declined_when_success_false_missing_or_array() {
        for body in [
            json!({"success": false}),
            json!({"success": null}),
            json!({"detail": "x"}),
            json!([{"success": true, "response": "Hello"}]),
            json!([]),
        ] {
            let reply = BackendReply::from_value(&body);
            assert!(matches!(reply, BackendReply::Declined { .. }), "{reply:?}");
        }
    }

    #[test]
    fn reply_malformed_when_success_lacks_text() {
        for body in [
            json!({"success": true}),
            json!({"success": true, "response": 7}),
            json!({"success": "yes", "response": "Hello"}),
        ] {
            let reply = BackendReply::from_value(&body);
            assert!(matches!(reply, BackendReply::Malformed { .. }), "{reply:?}");
        }
    }

    #[test]
    fn reply_malformed_for_scalar_bodies() {
        for body in [json!(null), json!("ok"), json!(3)] {
            let reply = BackendReply::from_value(&body);
            assert!(matches!(reply, BackendReply::Malformed { .. }), "{reply:?}");
        }
    }
}
