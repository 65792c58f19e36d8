use serde_json::Value;
use thiserror::Error;

/// Failure to exchange a request with the server at all (no response).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received
    Transport,
    /// 401 that could not be recovered by a token refresh
    Unauthorized,
    /// 403
    AccessDenied,
    /// 404
    NotFound,
    /// 429
    RateLimited,
    /// Any other 4xx
    Client,
    /// 5xx
    Server,
    /// The refresh token exchange failed; the session has been cleared
    RefreshFailed,
    /// A 2xx response whose body could not be used
    InvalidResponse,
    /// The request could not be built locally and was never sent
    InvalidRequest,
}

/// Normalized failure surfaced by every request function.
///
/// `message` is the server-supplied `message` field when present, otherwise
/// the operation's fallback text. `status` is `None` when no response
/// arrived. `data` holds the raw response body.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub data: Option<Value>,
}

/// Maximum length for non-JSON error bodies kept in `data`
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    fn kind_for_status(status: u16) -> ErrorKind {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::AccessDenied,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Client,
        }
    }

    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, body: &[u8], fallback: &str) -> Self {
        let data = if body.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(value) => Some(value),
                Err(_) => Some(Value::String(Self::truncate_body(
                    &String::from_utf8_lossy(body),
                ))),
            }
        };

        let message = data
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();

        Self {
            kind: Self::kind_for_status(status),
            message,
            status: Some(status),
            data,
        }
    }

    /// Build the error for a request that never got a response.
    pub fn transport(fallback: &str) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: fallback.to_string(),
            status: None,
            data: None,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidResponse,
            message: message.into(),
            status: None,
            data: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidRequest,
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Reclassify as a terminal refresh failure, keeping message, status and data.
    pub fn into_refresh_failure(self) -> Self {
        Self {
            kind: ErrorKind::RefreshFailed,
            ..self
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_preferred() {
        let body = br#"{"success":false,"message":"Gift not found"}"#;
        let err = ApiError::from_status(404, body, "Failed to get gift details");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Gift not found");
        assert_eq!(err.status, Some(404));
        assert_eq!(err.data, Some(json!({"success": false, "message": "Gift not found"})));
    }

    #[test]
    fn test_fallback_message_when_server_silent() {
        let err = ApiError::from_status(500, br#"{"error":"boom"}"#, "Failed to get config");
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.message, "Failed to get config");

        let err = ApiError::from_status(400, b"", "Failed to get config");
        assert_eq!(err.kind, ErrorKind::Client);
        assert_eq!(err.message, "Failed to get config");
        assert_eq!(err.data, None);

        let err = ApiError::from_status(400, br#"{"message":""}"#, "Failed to get config");
        assert_eq!(err.message, "Failed to get config");
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(401, b"", "x").kind, ErrorKind::Unauthorized);
        assert_eq!(ApiError::from_status(403, b"", "x").kind, ErrorKind::AccessDenied);
        assert_eq!(ApiError::from_status(429, b"", "x").kind, ErrorKind::RateLimited);
        assert_eq!(ApiError::from_status(503, b"", "x").kind, ErrorKind::Server);
        assert_eq!(ApiError::from_status(422, b"", "x").kind, ErrorKind::Client);
        assert!(ApiError::from_status(401, b"", "x").is_unauthorized());
    }

    #[test]
    fn test_non_json_body_is_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(502, body.as_bytes(), "Failed to get stats");
        let data = err.data.unwrap();
        let text = data.as_str().unwrap();
        assert!(text.starts_with(&"x".repeat(500)));
        assert!(text.ends_with("(truncated, 2000 total bytes)"));
        assert_eq!(err.message, "Failed to get stats");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::transport("Failed to get users list");
        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.status, None);
        assert_eq!(err.data, None);
        assert_eq!(err.to_string(), "Failed to get users list");
    }

    #[test]
    fn test_refresh_failure_keeps_details() {
        let err = ApiError::from_status(403, br#"{"message":"Refresh token revoked"}"#, "Refresh token failed")
            .into_refresh_failure();
        assert_eq!(err.kind, ErrorKind::RefreshFailed);
        assert_eq!(err.status, Some(403));
        assert_eq!(err.message, "Refresh token revoked");
    }
}
