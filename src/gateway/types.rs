//! Wire types exchanged with the demo-server backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the demonstration server implementations the backend can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServerVariant {
    #[serde(rename = "Single-Threaded")]
    SingleThreaded,
    #[serde(rename = "Multi-Threaded")]
    MultiThreaded,
    #[serde(rename = "Thread-Pool")]
    ThreadPool,
}

impl ServerVariant {
    /// Every variant, in display order.
    pub const ALL: [ServerVariant; 3] = [
        ServerVariant::SingleThreaded,
        ServerVariant::MultiThreaded,
        ServerVariant::ThreadPool,
    ];

    /// Name used on the wire and in the UI.
    pub fn name(self) -> &'static str {
        match self {
            ServerVariant::SingleThreaded => "Single-Threaded",
            ServerVariant::MultiThreaded => "Multi-Threaded",
            ServerVariant::ThreadPool => "Thread-Pool",
        }
    }
}

impl fmt::Display for ServerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServerVariant {
    type Err = String;

    /// Accepts the exact wire name, case-insensitively, and the common
    /// CLI spellings (`single`, `multi`, `pool`, `thread_pool`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "single-threaded" | "single" => Ok(ServerVariant::SingleThreaded),
            "multi-threaded" | "multi" => Ok(ServerVariant::MultiThreaded),
            "thread-pool" | "pool" | "threadpool" => Ok(ServerVariant::ThreadPool),
            _ => Err(format!("Unknown server variant: {}", s)),
        }
    }
}

/// Response of `GET {base}/{variant}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub running: bool,
}

/// Response of the start/stop endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST {base}/{variant}/test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestRequest {
    pub port: u16,
    pub number_of_requests: u32,
}

/// Result payload of a completed load test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestResult {
    pub total_requests: u64,
    /// Wall time of the whole run in milliseconds
    pub total_time: f64,
    /// Mean response time in milliseconds
    pub average_time: f64,
    pub requests_per_second: f64,
    /// Percentage of successful requests (0-100)
    pub success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_display_uses_wire_name() {
        assert_eq!(ServerVariant::SingleThreaded.to_string(), "Single-Threaded");
        assert_eq!(ServerVariant::MultiThreaded.to_string(), "Multi-Threaded");
        assert_eq!(ServerVariant::ThreadPool.to_string(), "Thread-Pool");
    }

    #[test]
    fn test_variant_from_str_accepts_aliases() {
        assert_eq!(
            "Multi-Threaded".parse::<ServerVariant>().unwrap(),
            ServerVariant::MultiThreaded
        );
        assert_eq!(
            "thread_pool".parse::<ServerVariant>().unwrap(),
            ServerVariant::ThreadPool
        );
        assert_eq!(
            "single".parse::<ServerVariant>().unwrap(),
            ServerVariant::SingleThreaded
        );
        assert!("quad-threaded".parse::<ServerVariant>().is_err());
    }

    #[test]
    fn test_variant_serde_uses_wire_name() {
        let json = serde_json::to_string(&ServerVariant::ThreadPool).unwrap();
        assert_eq!(json, "\"Thread-Pool\"");
        let parsed: ServerVariant = serde_json::from_str("\"Single-Threaded\"").unwrap();
        assert_eq!(parsed, ServerVariant::SingleThreaded);
    }

    #[test]
    fn test_load_test_request_is_camel_case() {
        let body = LoadTestRequest {
            port: 8081,
            number_of_requests: 100,
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["port"], 8081);
        assert_eq!(value["numberOfRequests"], 100);
    }

    #[test]
    fn test_load_test_result_parses_backend_payload() {
        let json = r#"{
            "totalRequests": 100,
            "totalTime": 523.4,
            "averageTime": 5.2,
            "requestsPerSecond": 191.06,
            "successRate": 100
        }"#;
        let result: LoadTestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_requests, 100);
        assert_eq!(result.average_time, 5.2);
        assert_eq!(result.success_rate, 100.0);
    }

    #[test]
    fn test_status_defaults_running_false() {
        let status: ServerStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.running);
    }
}
