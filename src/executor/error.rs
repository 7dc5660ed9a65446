//! HTTP transport error types.

use crate::models::CapturedResponse;
use thiserror::Error;

/// Errors raised when a request could not be completed.
///
/// These are transport failures only. A response with a 4xx/5xx status is a
/// successful exchange as far as the client is concerned; judging it is the
/// job of the scenario's assertions.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection failures, DNS resolution errors and other network issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The rendered URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Certificate validation errors, handshake failures.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// The request could not be constructed (bad header name or value, ...).
    #[error("Request build error: {0}")]
    BuildError(String),

    /// Only HTTP and HTTPS are supported.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// Status and headers arrived but reading the body failed.
    #[error("Incomplete response ({}): {message}", .partial.status_code)]
    Incomplete {
        message: String,
        partial: Box<CapturedResponse>,
    },
}

impl TransportError {
    /// The partially received response, if the failure happened after the
    /// status line arrived.
    pub fn partial_response(&self) -> Option<&CapturedResponse> {
        match self {
            TransportError::Incomplete { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::BuildError(message)
        } else if ["certificate", "TLS", "SSL"]
            .iter()
            .any(|marker| message.contains(marker))
        {
            TransportError::TlsError(message)
        } else {
            TransportError::NetworkError(message)
        }
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        TransportError::InvalidUrl(err.to_string())
    }
}
