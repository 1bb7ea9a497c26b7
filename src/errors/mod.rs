//! Error types for the MultiViz client.
//!
//! Every failure a client call can produce is a [`MultivizError`]. HTTP
//! failures keep the status code and the raw response body, so callers can
//! branch on the status and still inspect what the service returned.

mod detail;

pub use detail::{format_error_body, ErrorDetail, ValidationIssue, NOT_AVAILABLE};

use std::time::Duration;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for MultiViz operations.
pub type MultivizResult<T> = Result<T, MultivizError>;

/// Error type for MultiViz client operations.
#[derive(Debug, Error)]
pub enum MultivizError {
    /// Configuration error (missing API key, invalid base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The service answered with a non-2xx status that was not ignored.
    #[error("HTTP error {status_code}: {message}")]
    Http {
        /// HTTP status code.
        status_code: u16,
        /// Formatted error detail, see [`format_error_body`].
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Network/connection error (DNS, refused connection, TLS).
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Request timeout.
    #[error("Request timeout after {timeout:?}")]
    Timeout {
        /// The timeout that elapsed, when known.
        timeout: Option<Duration>,
    },

    /// The response could not be read.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl MultivizError {
    /// Returns the HTTP status code for [`MultivizError::Http`] errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MultivizError::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if the service reported a conflict (409).
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }

    /// Returns true if the service reported a missing resource (404).
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true for failures below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            MultivizError::Network { .. }
                | MultivizError::Timeout { .. }
                | MultivizError::InvalidResponse { .. }
        )
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        MultivizError::Configuration {
            message: message.into(),
        }
    }

    /// Creates an HTTP error from a status code and raw body.
    ///
    /// The message is the formatted error detail; bodies that are not JSON
    /// are kept verbatim.
    pub fn http(status_code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = format_error_body(&body).unwrap_or_else(|_| body.clone());
        MultivizError::Http {
            status_code,
            message,
            body,
        }
    }
}

impl From<TransportError> for MultivizError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection { message } | TransportError::Tls { message } => {
                MultivizError::Network { message }
            }
            TransportError::Timeout { timeout } => MultivizError::Timeout { timeout },
            TransportError::InvalidResponse { message } => {
                MultivizError::InvalidResponse { message }
            }
        }
    }
}

impl From<serde_json::Error> for MultivizError {
    fn from(err: serde_json::Error) -> Self {
        MultivizError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for MultivizError {
    fn from(err: url::ParseError) -> Self {
        MultivizError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
