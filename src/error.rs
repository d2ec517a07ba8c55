//! Error types for the OANDA v20 client.
//!
//! A single [`Error`] enum covers every failure mode: transport errors,
//! API error responses, stream corruption, handler failures and
//! cancellation of a long-lived stream.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for OANDA operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by stream handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for all OANDA API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (DNS, TLS, connect, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: status={status}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Optional error code from the API
        code: Option<String>,
        /// `rejectReason` followed by `errorMessage`, or the raw body
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Token was rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API (429)
    #[error("Rate limited; retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Number of seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// I/O failure while reading a stream body
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream server sent an `errorMessage` envelope instead of an event
    #[error("Stream error from server: {0}")]
    StreamServer(String),

    /// A stream line could not be decoded
    #[error("Failed to decode stream line {line:?}: {source}")]
    StreamDecode {
        /// The offending line
        line: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The caller's stream handler returned an error
    #[error("Stream handler error: {0}")]
    Handler(#[source] BoxError),

    /// The stream was cancelled by the caller
    #[error("Stream cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    ///
    /// The library never retries on its own; this is a hint for callers
    /// layering a reconnect policy above a stream.
    ///
    /// # Example
    ///
    /// ```
    /// use oanda_rs::Error;
    ///
    /// fn should_reconnect(err: &Error) -> bool {
    ///     err.is_retryable()
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Io(_) | Error::RateLimited { .. } => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the caller cancelled the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::Unauthorized(_)
            | Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            Error::StreamServer(_) => true,
            _ => false,
        }
    }

    /// Create an API error from an OANDA error body.
    ///
    /// OANDA reports failures as `{"errorMessage": ..}` with an optional
    /// `errorCode`, and order rejections additionally carry `rejectReason`.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let code = body
            .get("errorCode")
            .and_then(|c| c.as_str())
            .map(String::from);

        let reject_reason = body.get("rejectReason").and_then(|r| r.as_str());
        let error_message = body.get("errorMessage").and_then(|m| m.as_str());

        let message = match (reject_reason, error_message) {
            (None, None) => match &body {
                Value::String(raw) => raw.clone(),
                Value::Null => "Unknown API error".to_string(),
                other => other.to_string(),
            },
            (reason, msg) => format!("{}{}", reason.unwrap_or(""), msg.unwrap_or("")),
        };

        Error::Api {
            status,
            code,
            message,
            body,
        }
    }

    /// Message carried by the body, used for 401/404 variants.
    pub(crate) fn message_from_body(body: &Value, fallback: &str) -> String {
        body.get("errorMessage")
            .and_then(|m| m.as_str())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::RateLimited { retry_after_secs: 30 }.is_retryable());
        assert!(Error::from_api_response(503, Value::Null).is_retryable());
        assert!(!Error::InvalidInput("bad".into()).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
        assert!(!Error::StreamServer("boom".into()).is_retryable());
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::StreamServer("x".into()).is_cancelled());
        assert!(!Error::Handler("stop".into()).is_cancelled());
    }

    #[test]
    fn test_from_api_response() {
        let body = serde_json::json!({
            "errorCode": "INVALID_PARAMETER",
            "errorMessage": "Invalid value specified for 'accountID'"
        });

        let err = Error::from_api_response(400, body);
        match err {
            Error::Api {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some("INVALID_PARAMETER".to_string()));
                assert_eq!(message, "Invalid value specified for 'accountID'");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_joins_reject_reason() {
        let body = serde_json::json!({
            "rejectReason": "INSUFFICIENT_MARGIN",
            "errorMessage": ": not enough margin"
        });

        let err = Error::from_api_response(400, body);
        assert!(err.to_string().contains("INSUFFICIENT_MARGIN: not enough margin"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_from_api_response_raw_body() {
        let err = Error::from_api_response(502, Value::String("Bad Gateway".into()));
        match err {
            Error::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            _ => panic!("Expected Api error"),
        }
    }
}
