//! Error types for provider updates.

use thiserror::Error;

use crate::http::HttpError;

/// Error returned when an update is not confirmed by the provider.
///
/// Both variants leave the cached record for the host untouched.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The request never produced a response.
    #[error("Update request failed: {0}")]
    Transport(#[from] HttpError),

    /// The service answered with something other than HTTP 200.
    #[error("Update rejected with HTTP {status}{}", body_suffix(.body.as_deref()))]
    Rejected {
        /// Status code returned by the service.
        status: http::StatusCode,
        /// Response body, when it was readable text.
        body: Option<String>,
    },
}

fn body_suffix(body: Option<&str>) -> String {
    match body.map(str::trim) {
        Some(text) if !text.is_empty() => format!(": {text}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_includes_trimmed_body() {
        let err = UpdateError::Rejected {
            status: http::StatusCode::UNAUTHORIZED,
            body: Some("badauth\n".to_string()),
        };
        assert_eq!(err.to_string(), "Update rejected with HTTP 401 Unauthorized: badauth");
    }

    #[test]
    fn rejected_without_body() {
        let err = UpdateError::Rejected {
            status: http::StatusCode::INTERNAL_SERVER_ERROR,
            body: None,
        };
        assert_eq!(err.to_string(), "Update rejected with HTTP 500 Internal Server Error");
    }

    #[test]
    fn transport_wraps_http_error() {
        let err = UpdateError::from(HttpError::Timeout);
        assert!(matches!(err, UpdateError::Transport(HttpError::Timeout)));
    }
}
