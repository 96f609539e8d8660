//! Error types for dashboard settings.

use thiserror::Error;

/// Rejected form input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("port must be between 1 and 65535, got {0}")]
    InvalidPort(u32),

    #[error("number of requests must be positive, got {0}")]
    InvalidRequestCount(u32),
}
