//! Dashboard controller.
//!
//! Owns all dashboard state (status record, rolling window, last result,
//! loading flag, error message) and runs the operator's actions against the
//! backend gateway. Views only ever get owned snapshots via [`DashboardController::view`].
//!
//! Each action follows `Idle -> Pending -> Idle`. The loading flag is shared
//! by all actions and is cleared on every exit path. Gateway failures are
//! turned into a human-readable message; nothing propagates to the caller.

mod error;
mod view;


pub use error::SettingsError;
pub use view::{Action, ActionOutcome, DashboardView};

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::chart::{ChartFrame, ChartRenderer, ChartSurface};
use crate::dashboard::types::{LoadTestSample, WebSocketUpdate};
use crate::dashboard::window::{RollingWindow, DEFAULT_WINDOW_SIZE};
use crate::gateway::{BackendGateway, LoadTestResult, ServerVariant};
use crate::poller::{StatusPoller, StatusRecord};

/// Initial form values and window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub port: u16,
    pub number_of_requests: u32,
    pub window_size: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            port: 8081,
            number_of_requests: 100,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

struct ControllerState {
    server_types: Vec<String>,
    status: StatusRecord,
    loading: bool,
    error: Option<String>,
    selected_port: u16,
    number_of_requests: u32,
    last_result: Option<LoadTestResult>,
    window: RollingWindow,
    renderer: ChartRenderer,
}

/// Clears the shared loading flag when the action leaves scope.
struct LoadingGuard<'a> {
    controller: &'a DashboardController,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.controller.write().loading = false;
    }
}

pub struct DashboardController {
    gateway: Arc<dyn BackendGateway>,
    poller: StatusPoller,
    state: RwLock<ControllerState>,
    /// Optional WebSocket broadcast sender for dashboard updates
    ws_broadcast: Option<broadcast::Sender<WebSocketUpdate>>,
    cancel_token: CancellationToken,
}

impl DashboardController {
    pub fn new(gateway: Arc<dyn BackendGateway>, settings: ControllerSettings) -> Self {
        Self {
            poller: StatusPoller::new(Arc::clone(&gateway)),
            gateway,
            state: RwLock::new(ControllerState {
                server_types: Vec::new(),
                status: StatusRecord::new(),
                loading: false,
                error: None,
                selected_port: settings.port,
                number_of_requests: settings.number_of_requests,
                last_result: None,
                window: RollingWindow::with_capacity(settings.window_size),
                renderer: ChartRenderer::new(),
            }),
            ws_broadcast: None,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Set the WebSocket broadcast sender for dashboard updates.
    pub fn with_broadcast(mut self, sender: broadcast::Sender<WebSocketUpdate>) -> Self {
        self.ws_broadcast = Some(sender);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ControllerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ControllerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enter `Pending`: raise the loading flag and apply `prepare` in the same write.
    fn begin(&self, prepare: impl FnOnce(&mut ControllerState)) -> LoadingGuard<'_> {
        let mut state = self.write();
        state.loading = true;
        prepare(&mut state);
        LoadingGuard { controller: self }
    }

    /// Await a gateway call unless the controller is torn down first.
    async fn settle<T>(&self, call: impl Future<Output = T>) -> Option<T> {
        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => None,
            result = call => Some(result),
        }
    }

    fn publish_state(&self) {
        if let Some(sender) = &self.ws_broadcast {
            let update = crate::dashboard::websocket::create_state_update(&self.view());
            // Ignore error if no receivers are listening
            let _ = sender.send(update);
        }
    }

    /// Initial load: fetch the server list, then refresh status.
    pub async fn mount(&self) {
        self.load_server_types().await;
        self.refresh_status().await;
    }

    /// Fetch the variant names the backend offers.
    pub async fn load_server_types(&self) -> ActionOutcome {
        if self.is_torn_down() {
            return ActionOutcome::Cancelled;
        }
        let span = action_span("load_server_types", None);
        let outcome = async {
            match self.settle(self.gateway.list_servers()).await {
                None => ActionOutcome::Cancelled,
                Some(Ok(types)) => {
                    for name in &types {
                        if name.parse::<ServerVariant>().is_err() {
                            tracing::warn!(server_type = %name, "Backend reported unknown server type");
                        }
                    }
                    tracing::info!(server_types = ?types, "Available servers");
                    self.write().server_types = types;
                    ActionOutcome::Succeeded
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Error fetching server types");
                    self.write().error = Some("Failed to fetch server types".to_string());
                    ActionOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        self.finish(outcome)
    }

    /// Refresh the status of every variant.
    ///
    /// On failure the previous status record is kept as is.
    pub async fn refresh_status(&self) -> ActionOutcome {
        if self.is_torn_down() {
            return ActionOutcome::Cancelled;
        }
        let span = action_span("refresh_status", None);
        let outcome = async {
            let _loading = self.begin(|_| {});
            self.apply_status_refresh().await
        }
        .instrument(span)
        .await;

        self.finish(outcome)
    }

    /// Poll every variant and apply the result. Leaves the loading flag and
    /// the state broadcast to the calling action.
    async fn apply_status_refresh(&self) -> ActionOutcome {
        match self.settle(self.poller.refresh(&ServerVariant::ALL)).await {
            None => ActionOutcome::Cancelled,
            Some(Ok(record)) => {
                let mut state = self.write();
                state.status = record;
                state.error = None;
                ActionOutcome::Succeeded
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Error fetching status");
                self.write().error = Some("Failed to fetch server status".to_string());
                ActionOutcome::Failed
            }
        }
    }

    /// Start `variant` on the selected port, then refresh status once.
    pub async fn start(&self, variant: ServerVariant) -> ActionOutcome {
        if self.is_torn_down() {
            return ActionOutcome::Cancelled;
        }
        let span = action_span("start", Some(variant));
        let outcome = async {
            let _loading = self.begin(|state| state.error = None);
            let port = self.read().selected_port;
            match self.settle(self.gateway.start(variant, port)).await {
                None => ActionOutcome::Cancelled,
                Some(Ok(response)) => {
                    tracing::info!(port, message = ?response.message, "Server started");
                    self.follow_up_refresh().await
                }
                Some(Err(e)) => {
                    tracing::error!(port, error = %e, "Error starting server");
                    self.write().error =
                        Some(format!("Failed to start {} server: {}", variant, e.detail()));
                    ActionOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        self.finish(outcome)
    }

    /// Stop `variant`, then refresh status once.
    pub async fn stop(&self, variant: ServerVariant) -> ActionOutcome {
        if self.is_torn_down() {
            return ActionOutcome::Cancelled;
        }
        let span = action_span("stop", Some(variant));
        let outcome = async {
            let _loading = self.begin(|state| state.error = None);
            match self.settle(self.gateway.stop(variant)).await {
                None => ActionOutcome::Cancelled,
                Some(Ok(response)) => {
                    tracing::info!(message = ?response.message, "Server stopped");
                    self.follow_up_refresh().await
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Error stopping server");
                    self.write().error =
                        Some(format!("Failed to stop {} server: {}", variant, e.detail()));
                    ActionOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        self.finish(outcome)
    }

    /// Run a load test against `variant` and plot the result.
    pub async fn run_load_test(&self, variant: ServerVariant) -> ActionOutcome {
        if self.is_torn_down() {
            return ActionOutcome::Cancelled;
        }
        let span = action_span("run_load_test", Some(variant));
        let outcome = async {
            let _loading = self.begin(|state| state.last_result = None);
            let (port, number_of_requests) = {
                let state = self.read();
                (state.selected_port, state.number_of_requests)
            };
            tracing::info!(port, number_of_requests, "Running load test");

            let call = self.gateway.run_load_test(variant, port, number_of_requests);
            match self.settle(call).await {
                None => ActionOutcome::Cancelled,
                Some(Ok(result)) => {
                    tracing::info!(
                        average_time_ms = result.average_time,
                        requests_per_second = result.requests_per_second,
                        success_rate = result.success_rate,
                        "Load test completed"
                    );
                    let mut guard = self.write();
                    let state = &mut *guard;
                    state.last_result = Some(result);
                    state.window.push(LoadTestSample::from_result(variant, &result));
                    let samples = state.window.snapshot();
                    state.renderer.render(&samples);
                    state.error = None;
                    ActionOutcome::Succeeded
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Error running load test");
                    self.write().error = Some(format!("Failed to run load test: {}", e.detail()));
                    ActionOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        self.finish(outcome)
    }

    /// Status refresh after a successful start or stop. The action itself
    /// succeeded whatever the refresh reports, unless teardown interrupted it.
    async fn follow_up_refresh(&self) -> ActionOutcome {
        match self.apply_status_refresh().await {
            ActionOutcome::Cancelled => ActionOutcome::Cancelled,
            _ => ActionOutcome::Succeeded,
        }
    }

    /// Run `action` on its own task.
    ///
    /// The task belongs to the controller, not to whoever awaits the handle:
    /// dropping the handle leaves the action running, and a result that
    /// arrives later is still applied. Only [`teardown`](Self::teardown)
    /// stops it.
    pub fn spawn_action(self: &Arc<Self>, action: Action) -> JoinHandle<ActionOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.perform(action).await })
    }

    pub async fn perform(&self, action: Action) -> ActionOutcome {
        match action {
            Action::RefreshStatus => self.refresh_status().await,
            Action::Start(variant) => self.start(variant).await,
            Action::Stop(variant) => self.stop(variant).await,
            Action::RunLoadTest(variant) => self.run_load_test(variant).await,
        }
    }

    fn finish(&self, outcome: ActionOutcome) -> ActionOutcome {
        if outcome != ActionOutcome::Cancelled {
            self.publish_state();
        }
        outcome
    }

    /// Attach the chart surface once the view can draw, and paint the current window.
    ///
    /// Safe to call more than once; only the first surface is kept.
    pub fn initialize_chart(&self, surface: Arc<dyn ChartSurface>) -> bool {
        let mut guard = self.write();
        let state = &mut *guard;
        if !state.renderer.initialize(surface) {
            return false;
        }
        let samples = state.window.snapshot();
        state.renderer.render(&samples);
        tracing::debug!(points = samples.len(), "Chart initialized");
        true
    }

    /// Update the port and request count used by later actions.
    pub fn update_settings(&self, port: u32, number_of_requests: u32) -> Result<(), SettingsError> {
        let port = u16::try_from(port)
            .ok()
            .filter(|p| *p > 0)
            .ok_or(SettingsError::InvalidPort(port))?;
        if number_of_requests == 0 {
            return Err(SettingsError::InvalidRequestCount(number_of_requests));
        }

        {
            let mut state = self.write();
            state.selected_port = port;
            state.number_of_requests = number_of_requests;
        }
        tracing::debug!(port, number_of_requests, "Settings updated");
        self.publish_state();
        Ok(())
    }

    /// Stop applying results. Pending actions settle as `Cancelled`.
    pub fn teardown(&self) {
        tracing::debug!("Dashboard controller torn down");
        self.cancel_token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn view(&self) -> DashboardView {
        let state = self.read();
        DashboardView {
            server_types: state.server_types.clone(),
            server_status: state.status.clone(),
            loading: state.loading,
            error: state.error.clone(),
            selected_port: state.selected_port,
            number_of_requests: state.number_of_requests,
            load_test_results: state.last_result,
            samples: state.window.snapshot(),
            chart: state.renderer.frame().clone(),
        }
    }

    pub fn status(&self) -> StatusRecord {
        self.read().status.clone()
    }

    pub fn samples(&self) -> Vec<LoadTestSample> {
        self.read().window.snapshot()
    }

    pub fn chart_frame(&self) -> ChartFrame {
        self.read().renderer.frame().clone()
    }

    pub fn last_result(&self) -> Option<LoadTestResult> {
        self.read().last_result
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }
}

fn action_span(action: &'static str, variant: Option<ServerVariant>) -> tracing::Span {
    let action_id = crate::logging::generate_action_id();
    match variant {
        Some(variant) => tracing::info_span!("dashboard_action", action, %variant, %action_id),
        None => tracing::info_span!("dashboard_action", action, %action_id),
    }
}
