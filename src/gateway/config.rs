//! Configuration for the backend gateway client.

use serde::{Deserialize, Serialize};

/// Where the demo-server backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the server-control API (e.g. "http://localhost:8080/api/servers")
    pub api_url: String,
    /// Transport timeout per request; 0 disables it
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/servers".to_string(),
            timeout_seconds: 30,
        }
    }
}
