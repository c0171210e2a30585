//! Response envelope handling
//!
//! Server responses are `{success, message?, ...payload}` JSON. A non-2xx
//! status is an error whatever the body says; `success: false` is a
//! rejection; a missing `success` counts as success.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::RawResponse;
use crate::core::SyncError;

/// Decoded payload plus the server's optional human-readable message
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: Option<String>,
    pub payload: T,
}

impl<T> Reply<T> {
    /// The server message, or `fallback` when there is none
    pub fn message_or(&self, fallback: impl Into<String>) -> String {
        match self.message.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => fallback.into(),
        }
    }
}

pub fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<Reply<T>, SyncError> {
    if !raw.is_success() {
        let detail = serde_json::from_str::<Value>(&raw.body)
            .ok()
            .and_then(|value| server_text(&value));
        return Err(SyncError::Http { status: raw.status, detail });
    }

    let value: Value = if raw.body.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&raw.body)?
    };

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(SyncError::Rejected { message: server_text(&value) });
    }

    let message = value.get("message").and_then(Value::as_str).map(str::to_string);
    let payload = serde_json::from_value(value)?;
    Ok(Reply { message, payload })
}

/// `message`, falling back to `error`, the two fields the server uses for text
fn server_text(value: &Value) -> Option<String> {
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
