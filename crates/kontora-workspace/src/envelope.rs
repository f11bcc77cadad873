//! The result envelope returned to UI callers.
//!
//! Forms render `message` inline and branch on `error`; they never see a
//! raw error value.

use serde::{Deserialize, Serialize};

/// `{ message, error, data? }` outcome of a user-facing action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Whether the action failed.
    pub error: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    /// A successful outcome carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            error: false,
            data: Some(data),
        }
    }

    /// A failed outcome with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
            data: None,
        }
    }

    /// Whether the action succeeded.
    pub fn is_success(&self) -> bool {
        !self.error
    }
}
