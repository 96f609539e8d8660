//! Configuration for background status polling.

use serde::{Deserialize, Serialize};

/// Periodic status refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Whether the dashboard refreshes status on its own
    pub enabled: bool,
    /// Seconds between refreshes
    pub interval_seconds: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 10,
        }
    }
}
