use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

/// Error payload as the backend sends it. Every field is optional; only
/// `message` is ever shown to users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ErrorBody {
    /// Decodes a raw response body, tolerating empty and non-JSON bodies.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn user_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Error)]
#[error("{code:?} ({status}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct ApiError {
    pub code: ErrorCode,
    pub status: u16,
    pub message: Option<String>,
}

impl ApiError {
    pub fn from_response(status: u16, raw_body: &str) -> Self {
        let body = ErrorBody::parse(raw_body);
        Self {
            code: ErrorCode::from_status(status),
            status,
            message: body.user_message().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_from_json_body() {
        let err = ApiError::from_response(409, r#"{"message":"Titre déjà utilisé","status":409}"#);
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message.as_deref(), Some("Titre déjà utilisé"));
    }

    #[test]
    fn tolerates_html_and_blank_messages() {
        let html = ApiError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(html.code, ErrorCode::Internal);
        assert!(html.message.is_none());

        let blank = ApiError::from_response(400, r#"{"message":"   "}"#);
        assert!(blank.message.is_none());
    }
}
