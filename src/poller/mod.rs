//! Server status polling.
//!
//! A refresh asks the backend for the status of every variant at once and
//! only produces a mapping when all of the requests succeed. A single failed
//! request fails the whole refresh with one aggregated [`PollError`], leaving
//! the caller free to keep its last known good mapping.

mod config;
mod error;

pub use config::PollerConfig;
pub use error::PollError;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::controller::DashboardController;
use crate::gateway::{BackendGateway, ServerVariant};

/// Running flag per server variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(BTreeMap<ServerVariant, bool>);

impl StatusRecord {
    /// Every known variant, all stopped.
    pub fn new() -> Self {
        Self(ServerVariant::ALL.iter().map(|v| (*v, false)).collect())
    }

    pub fn is_running(&self, variant: ServerVariant) -> bool {
        self.0.get(&variant).copied().unwrap_or(false)
    }

    pub fn set(&mut self, variant: ServerVariant, running: bool) {
        self.0.insert(variant, running);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServerVariant, bool)> + '_ {
        self.0.iter().map(|(v, r)| (*v, *r))
    }

    pub fn running_count(&self) -> usize {
        self.0.values().filter(|r| **r).count()
    }
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches status for a set of variants concurrently.
pub struct StatusPoller {
    gateway: Arc<dyn BackendGateway>,
}

impl StatusPoller {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Query every variant concurrently and wait for all of them.
    ///
    /// Succeeds only if every request succeeds; otherwise returns one error
    /// listing each failed variant.
    pub async fn refresh(&self, variants: &[ServerVariant]) -> Result<StatusRecord, PollError> {
        let requests = variants.iter().map(|variant| {
            let gateway = Arc::clone(&self.gateway);
            let variant = *variant;
            async move { (variant, gateway.status(variant).await) }
        });
        let results = join_all(requests).await;

        let mut record = StatusRecord::new();
        let mut failures = Vec::new();
        for (variant, result) in results {
            match result {
                Ok(status) => {
                    tracing::debug!(variant = %variant, running = status.running, "Server status");
                    record.set(variant, status.running);
                }
                Err(error) => {
                    tracing::warn!(variant = %variant, error = %error, "Status request failed");
                    failures.push((variant, error));
                }
            }
        }

        if failures.is_empty() {
            Ok(record)
        } else {
            Err(PollError::Failed { failures })
        }
    }
}

/// Refresh the controller's status on a fixed interval until cancelled.
pub fn spawn_status_loop(
    controller: Arc<DashboardController>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(config.interval_seconds.max(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(
            interval_seconds = config.interval_seconds,
            "Status poller started"
        );

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::info!("Status poller shutting down");
                    break;
                }
                _ = interval.tick() => {
                    controller.refresh_status().await;
                    tracing::debug!("Status poll cycle completed");
                }
            }
        }
    })
}
