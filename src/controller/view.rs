//! Read-only projections of controller state.

use serde::{Deserialize, Serialize};

use crate::chart::ChartFrame;
use crate::dashboard::types::LoadTestSample;
use crate::gateway::{LoadTestResult, ServerVariant};
use crate::poller::StatusRecord;

/// Snapshot of everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Variant names reported by the backend
    pub server_types: Vec<String>,
    pub server_status: StatusRecord,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_port: u16,
    pub number_of_requests: u32,
    /// Result of the most recent load test, cleared while one is running
    pub load_test_results: Option<LoadTestResult>,
    /// Rolling window, oldest first
    pub samples: Vec<LoadTestSample>,
    pub chart: ChartFrame,
}

/// An operator action the controller can run on its own task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RefreshStatus,
    Start(ServerVariant),
    Stop(ServerVariant),
    RunLoadTest(ServerVariant),
}

/// How a dashboard action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Succeeded,
    /// The failure message is in the controller's error field
    Failed,
    /// The controller was torn down before the call settled; nothing was applied
    Cancelled,
}

impl ActionOutcome {
    pub fn is_success(self) -> bool {
        self == ActionOutcome::Succeeded
    }
}
