//! The uniform response envelope.
//!
//! Success bodies carry `"success": true` plus action-specific fields
//! (see [`crate::dto`]); every failure is an HTTP 500 with this body.

use serde::{Deserialize, Serialize};

/// Failure body: `{"success": false, "error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}
