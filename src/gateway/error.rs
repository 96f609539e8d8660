//! Error types for backend gateway calls.

use thiserror::Error;

/// Errors that can occur while calling the demo-server backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport failure (connection refused, DNS, reset, ...). No body.
    #[error("{0}")]
    Connectivity(String),

    /// Request exceeded the transport timeout.
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Backend answered with a structured error payload or an error status.
    #[error("{detail}")]
    Server { detail: String },

    /// Backend answered 2xx but the body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Argument rejected before any request was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GatewayError {
    /// Human-readable detail used in controller error messages.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// True for failures where no response reached us.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::Connectivity(_) | GatewayError::Timeout(_))
    }
}
