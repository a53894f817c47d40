//! API Errors
//!
//! Failure kinds the pages distinguish.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never got a response
    Network(String),
    /// Token missing, expired or revoked
    Unauthorized,
    Forbidden(String),
    NotFound,
    Status { code: u16, detail: Option<String> },
    /// Response body did not match the expected shape
    Decode(String),
    /// Payload rejected before sending
    Invalid(String),
}

impl ApiError {
    pub fn from_status(code: u16, body: &str) -> Self {
        let detail = detail_from_body(body);
        match code {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(detail.unwrap_or_else(|| "Forbidden".to_string())),
            404 => ApiError::NotFound,
            _ => ApiError::Status { code, detail },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text for inline form errors: the backend's own message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            ApiError::Forbidden(msg) | ApiError::Invalid(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Unauthorized => write!(f, "Session expired, please sign in again"),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Status { code, detail: Some(detail) } => write!(f, "HTTP {}: {}", code, detail),
            ApiError::Status { code, detail: None } => write!(f, "HTTP {}", code),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Invalid(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// `{"detail": "..."}` or a validation list `{"detail": [{"msg": "..."}]}`
fn detail_from_body(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Envelope {
        detail: serde_json::Value,
    }

    let envelope: Envelope = serde_json::from_str(body).ok()?;
    match envelope.detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
