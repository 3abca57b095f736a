//! Error taxonomy for REST calls.

use serde_json::Value;

/// Every way an API call can fail.
///
/// Status-carrying variants keep the server-provided message, if any, so the
/// view layer can show it in preference to its own fallback text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection refused, CORS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// 401 / 403.
    #[error("unauthorized ({status}): {}", detail(.message))]
    Unauthorized { status: u16, message: Option<String> },

    /// 400 / 422, or a payload rejected locally before sending.
    #[error("validation failed: {}", detail(.message))]
    Validation { message: Option<String> },

    /// 404.
    #[error("not found: {}", detail(.message))]
    NotFound { message: Option<String> },

    /// Any other non-success status.
    #[error("server error ({status}): {}", detail(.message))]
    Server { status: u16, message: Option<String> },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Client-side validation failure with a user-facing message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: Some(message.into()),
        }
    }

    /// Classify a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            400 | 422 => Self::Validation { message },
            404 => Self::NotFound { message },
            _ => Self::Server { status, message },
        }
    }

    /// The server-provided (or locally produced) message, if there is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. }
            | Self::Validation { message }
            | Self::NotFound { message }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Short string for display: the server message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

fn detail(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no detail")
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, the list form validation errors use
/// (`{"detail": [{"msg": "..."}, ...]}`), and `{"message": "..."}`.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_status(401, ""),
            ApiError::Unauthorized { status: 401, message: None }
        ));
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(422, "{}"),
            ApiError::Validation { message: None }
        ));
        assert!(matches!(
            ApiError::from_status(404, ""),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, "Service Unavailable"),
            ApiError::Server { status: 503, message: None }
        ));
    }

    #[test]
    fn test_detail_message_preferred() {
        let err = ApiError::from_status(401, r#"{"detail":"Invalid email or password"}"#);
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
    }

    #[test]
    fn test_message_field_and_detail_list() {
        let err = ApiError::from_status(400, r#"{"message":"Email already registered"}"#);
        assert_eq!(err.message(), Some("Email already registered"));

        let err = ApiError::from_status(
            422,
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"},{"msg":"field required"}]}"#,
        );
        assert_eq!(
            err.message(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_fallback_when_no_server_message() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.user_message("Failed to load decisions"), "Failed to load decisions");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ApiError::invalid("Title is required");
        assert_eq!(err.to_string(), "validation failed: Title is required");
    }
}
