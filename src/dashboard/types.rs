//! Type definitions for dashboard data structures

use serde::{Deserialize, Serialize};

use crate::gateway::{LoadTestResult, ServerVariant};

/// One completed load test as plotted on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestSample {
    /// Variant the test ran against
    pub server_type: ServerVariant,
    /// Mean response time in milliseconds
    pub average_time_ms: f64,
    /// Throughput reported by the backend
    pub requests_per_second: f64,
    /// Local wall-clock time the result arrived (HH:MM:SS)
    pub timestamp: String,
}

impl LoadTestSample {
    /// Builds a sample from a load test result, stamped with the current local time
    pub fn from_result(server_type: ServerVariant, result: &LoadTestResult) -> Self {
        Self::with_timestamp(
            server_type,
            result,
            chrono::Local::now().format("%H:%M:%S").to_string(),
        )
    }

    pub fn with_timestamp(
        server_type: ServerVariant,
        result: &LoadTestResult,
        timestamp: String,
    ) -> Self {
        Self {
            server_type,
            average_time_ms: result.average_time.max(0.0),
            requests_per_second: result.requests_per_second.max(0.0),
            timestamp,
        }
    }

    /// Chart x-axis label: "{serverType} ({timestamp})"
    pub fn label(&self) -> String {
        format!("{} ({})", self.server_type, self.timestamp)
    }
}

/// WebSocket update message sent to dashboard clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketUpdate {
    /// Type of update
    pub update_type: UpdateType,
    /// JSON payload for the update
    pub data: serde_json::Value,
}

/// Type of WebSocket update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// Full dashboard state after an action settled
    State,
    /// Chart frame redrawn
    ChartUpdate,
}
