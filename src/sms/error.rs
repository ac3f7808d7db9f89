//! SMS delivery error types

use thiserror::Error;

/// SMS channel error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SmsError {
    pub kind: SmsErrorKind,
    pub message: String,
}

impl SmsError {
    pub fn new(kind: SmsErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SmsErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SmsErrorKind::Timeout, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SmsErrorKind::Unavailable, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(SmsErrorKind::Rejected, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SmsErrorKind::Malformed, message)
    }

    /// Classify a transport-level failure from the HTTP client
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("Request timeout: {err}"))
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(format!("Request failed: {err}"))
        }
    }

    /// Classify a non-2xx response from the messaging API
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        match status.as_u16() {
            401 | 403 => Self::new(
                SmsErrorKind::Auth,
                format!("Authentication failed (HTTP {status}): {body}"),
            ),
            429 => Self::new(
                SmsErrorKind::RateLimit,
                format!("Rate limited (HTTP {status}): {body}"),
            ),
            400..=499 => Self::new(
                SmsErrorKind::InvalidRequest,
                format!("Invalid request (HTTP {status}): {body}"),
            ),
            500..=599 => Self::new(
                SmsErrorKind::ServerError,
                format!("Server error (HTTP {status}): {body}"),
            ),
            _ => Self::new(SmsErrorKind::Unknown, format!("HTTP {status}: {body}")),
        }
    }
}

/// Error classification for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsErrorKind {
    /// Connection or I/O failure
    Network,
    /// Request exceeded the channel's time bound
    Timeout,
    /// Channel could not be initialised
    Unavailable,
    /// Authentication failed (401, 403)
    Auth,
    /// Rate limited (429)
    RateLimit,
    /// Other 4xx
    InvalidRequest,
    /// 5xx
    ServerError,
    /// Provider answered but accepted no recipients
    Rejected,
    /// Response body did not have the expected shape
    Malformed,
    Unknown,
}

impl SmsErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Unavailable => "unavailable",
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::InvalidRequest => "invalid_request",
            Self::ServerError => "server_error",
            Self::Rejected => "rejected",
            Self::Malformed => "malformed",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_classification() {
        let cases = [
            (StatusCode::UNAUTHORIZED, SmsErrorKind::Auth),
            (StatusCode::FORBIDDEN, SmsErrorKind::Auth),
            (StatusCode::TOO_MANY_REQUESTS, SmsErrorKind::RateLimit),
            (StatusCode::BAD_REQUEST, SmsErrorKind::InvalidRequest),
            (StatusCode::NOT_FOUND, SmsErrorKind::InvalidRequest),
            (StatusCode::BAD_GATEWAY, SmsErrorKind::ServerError),
            (StatusCode::MOVED_PERMANENTLY, SmsErrorKind::Unknown),
        ];
        for (status, kind) in cases {
            assert_eq!(SmsError::from_status(status, "").kind, kind, "{status}");
        }
    }

    #[test]
    fn test_status_message_carries_body() {
        let err = SmsError::from_status(StatusCode::UNAUTHORIZED, "The supplied authentication is invalid\n");
        assert!(err.to_string().contains("401"));
        assert!(err
            .to_string()
            .ends_with("The supplied authentication is invalid"));
    }
}
