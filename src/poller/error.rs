//! Error types for status polling.

use thiserror::Error;

use crate::gateway::{GatewayError, ServerVariant};

/// Aggregated failure of one status refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    /// One or more status requests failed; nothing from the refresh is applied
    #[error("status refresh failed for {}: {}", .failures.len(), summarize(.failures))]
    Failed {
        failures: Vec<(ServerVariant, GatewayError)>,
    },
}

impl PollError {
    pub fn failures(&self) -> &[(ServerVariant, GatewayError)] {
        match self {
            PollError::Failed { failures } => failures,
        }
    }
}

fn summarize(failures: &[(ServerVariant, GatewayError)]) -> String {
    failures
        .iter()
        .map(|(variant, error)| format!("{} ({})", variant, error))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_error_display_lists_failures() {
        let err = PollError::Failed {
            failures: vec![
                (
                    ServerVariant::MultiThreaded,
                    GatewayError::Connectivity("connection refused".to_string()),
                ),
                (ServerVariant::ThreadPool, GatewayError::Timeout(5)),
            ],
        };
        assert_eq!(
            err.to_string(),
            "status refresh failed for 2: Multi-Threaded (connection refused), Thread-Pool (request timeout after 5s)"
        );
        assert_eq!(err.failures().len(), 2);
    }
}
