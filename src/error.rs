use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::response::json_response;

pub const METHOD_NOT_ALLOWED_HINT: &str =
    "Method not allowed. Use POST with JSON body: {\"url\": \"...\"}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    MissingUrl,
    RequestFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::MissingUrl => "missing_url",
            Self::RequestFailed => "request_failed",
        }
    }
}

/// `{"status": "error", "error": {"code": ..., "context": ...}}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    status: &'static str,
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: ErrorCode, context: Option<String>) -> Self {
        Self {
            status: "error",
            error: ErrorDetail { code, context },
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.error.code
    }

    pub fn context(&self) -> Option<&str> {
        self.error.context.as_deref()
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Envelope(ErrorEnvelope),
    Message { error: String },
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn invalid_json() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Envelope(ErrorEnvelope::new(ErrorCode::InvalidJson, None)),
        }
    }

    pub fn missing_url() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Envelope(ErrorEnvelope::new(ErrorCode::MissingUrl, None)),
        }
    }

    pub fn not_found() -> Self {
        Self::message(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::message(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_HINT)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::Message {
                error: message.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Error code for envelope errors, `None` for plain message errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match &self.body {
            ErrorBody::Envelope(envelope) => Some(envelope.code()),
            ErrorBody::Message { .. } => None,
        }
    }

    pub fn message_text(&self) -> String {
        match &self.body {
            ErrorBody::Envelope(envelope) => envelope.code().as_str().to_string(),
            ErrorBody::Message { error } => error.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message_text(), self.status)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_response(self.status, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_serializes_without_context() {
        let value = serde_json::to_value(ErrorEnvelope::new(ErrorCode::MissingUrl, None)).unwrap();
        assert_eq!(value, json!({"status": "error", "error": {"code": "missing_url"}}));
    }

    #[test]
    fn envelope_carries_context_for_request_failed() {
        let value =
            serde_json::to_value(ErrorEnvelope::new(ErrorCode::RequestFailed, Some("timed out".into())))
                .unwrap();
        assert_eq!(
            value,
            json!({"status": "error", "error": {"code": "request_failed", "context": "timed out"}})
        );
    }

    #[test]
    fn message_errors_have_no_code() {
        let error = ApiError::method_not_allowed();
        assert_eq!(error.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error.code(), None);
        assert_eq!(error.message_text(), METHOD_NOT_ALLOWED_HINT);
        assert_eq!(ApiError::missing_url().code(), Some(ErrorCode::MissingUrl));
    }
}
