//! Common types shared by all agent operations.
//!
//! Every operation on a [`CodingAgent`](crate::CodingAgent) returns an
//! [`AgentResponse`]; callers own the response and it is never mutated
//! after the operation returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form context passed alongside an operation (issue number, PR
/// number, repository, ...).
pub type TaskContext = Map<String, Value>;

/// The uniform result of an agent operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Human-readable summary of what happened.
    pub message: String,

    /// Descriptions of the changes the agent made (or would make).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,

    /// Error text when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Operation-specific metadata (entry counts, diff sizes, model used).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl AgentResponse {
    /// A successful response with the given message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            changes: Vec::new(),
            error: None,
            metadata: Map::new(),
        }
    }

    /// A failed response carrying the error text.
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            changes: Vec::new(),
            error: Some(error.into()),
            metadata: Map::new(),
        }
    }

    /// Append a change description.
    pub fn with_change(mut self, change: impl Into<String>) -> Self {
        self.changes.push(change.into());
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Truncate `s` to at most `max_chars` characters, appending an ellipsis
/// when anything was cut. Always splits on a character boundary.
pub(crate) fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Serialize the optional caller context into a metadata value.
///
/// Missing context becomes an empty object so the metadata shape is stable.
pub(crate) fn context_value(context: Option<&TaskContext>) -> Result<Value, serde_json::Error> {
    serde_json::to_value(context.cloned().unwrap_or_default())
}
