//! API response types

use serde::{Deserialize, Serialize};

/// Standard Cloudflare API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
}

/// API error entry
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    pub code: Option<i64>,
    pub message: String,
}

/// API informational message
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub code: Option<i64>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Join all error messages into one human-readable string.
    pub fn error_messages(&self) -> String {
        if self.errors.is_empty() {
            return "Unknown error".to_string();
        }
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
