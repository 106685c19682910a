//! Backend client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
///
/// Views collapse all of these into one generic failure path; the variants
/// exist for logging and for the CLI's exit messages.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured base URL cannot be used.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// The HTTP status code, when the backend responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// The response body text for non-2xx responses.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_status_and_body() {
        let err = RequestError::Status {
            status: 500,
            body: r#"{"error":"Stripe error: boom"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some(r#"{"error":"Stripe error: boom"}"#));
        assert_eq!(
            err.to_string(),
            r#"Backend returned 500: {"error":"Stripe error: boom"}"#
        );
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = RequestError::Parse("expected value".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
