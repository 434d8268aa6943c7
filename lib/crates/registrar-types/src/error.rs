use serde::{Deserialize, Serialize};

/// Standard Google API error body: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GoogleErrorEnvelope {
    /// Extract the human-readable message from a response body, if it is a
    /// Google error envelope with a non-empty message.
    #[must_use]
    pub fn message_from_body(body: &str) -> Option<String> {
        let envelope: Self = serde_json::from_str(body).ok()?;
        let message = envelope.error.message.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }
}
