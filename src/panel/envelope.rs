use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::Tool;

/// Field a backend uses to refuse input it does not consider source code.
pub const REJECTION_FIELD: &str = "errorMsg";

#[derive(Debug, Error, Diagnostic)]
pub enum EnvelopeError {
    #[error("backend response has no `{key}` result")]
    #[diagnostic(code(detectai::envelope::missing))]
    Missing { key: &'static str },

    #[error("backend `{key}` result has an unexpected shape")]
    #[diagnostic(code(detectai::envelope::shape))]
    Shape {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Accepted(T),
    Rejected(String),
}

/// Reads the rejection message, if any. Absent, `null`, `false` and `""`
/// do not count as a rejection.
pub fn rejection_message(body: &Value) -> Option<String> {
    match body.get(REJECTION_FIELD)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// A rejection wins over any result fields that come along with it.
pub fn decode<T: DeserializeOwned>(tool: Tool, body: Value) -> Result<Envelope<T>, EnvelopeError> {
    if let Some(message) = rejection_message(&body) {
        return Ok(Envelope::Rejected(message));
    }

    let key = tool.envelope_key();

    let payload = match body {
        Value::Object(mut fields) => fields.remove(key),
        _ => None,
    };

    let payload = match payload {
        Some(Value::Null) | None => return Err(EnvelopeError::Missing { key }),
        Some(payload) => payload,
    };

    serde_json::from_value(payload)
        .map(Envelope::Accepted)
        .map_err(|source| EnvelopeError::Shape { key, source })
}
