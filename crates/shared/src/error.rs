use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    /// Human-readable detail, if the server sent a usable one.
    ///
    /// String details are returned verbatim; structured details (lists of
    /// validation errors and the like) are rendered as compact JSON.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
