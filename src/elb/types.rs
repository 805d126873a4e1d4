//! Remote API error definitions.

use std::fmt;

use thiserror::Error;

/// Which client timeout fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// TCP/TLS connection was not established in time.
    Connect,
    /// The whole request, body included, ran past its deadline.
    Request,
}

impl fmt::Display for TimeoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutPhase::Connect => write!(f, "Connection"),
            TimeoutPhase::Request => write!(f, "Request"),
        }
    }
}

/// Errors raised while fetching a health snapshot.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    /// Connection, TLS or body transfer failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Connect or request timeout exceeded.
    #[error("{phase} timed out after {secs} seconds")]
    Timeout { phase: TimeoutPhase, secs: u64 },

    /// The API answered with an error document.
    #[error("{code}: {message} (HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request signature could not be computed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Endpoint URL is unusable for a request.
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}

impl RemoteFetchError {
    /// API error code, when the load balancer returned one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            RemoteFetchError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
