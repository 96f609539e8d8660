//! Dashboard action endpoints.
//!
//! Each action runs on a controller-owned task and the handler answers with
//! the resulting [`DashboardView`]. A request that times out or disconnects
//! stops waiting, but the action still finishes and its result is applied. Gateway failures are not HTTP errors: they
//! show up in the view's `error` field exactly as the page displays them.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{ApiError, AppState};
use crate::controller::{Action, DashboardView};
use crate::gateway::ServerVariant;

/// Body of `PUT /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    pub port: u32,
    pub number_of_requests: u32,
}

fn parse_variant(name: &str) -> Result<ServerVariant, ApiError> {
    name.parse().map_err(|_| ApiError::unknown_variant(name))
}

async fn run(state: &AppState, action: Action) -> Result<Json<DashboardView>, ApiError> {
    state.controller.spawn_action(action).await?;
    Ok(Json(state.controller.view()))
}

/// GET /api/state
pub async fn state(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.controller.view())
}

/// POST /api/status/refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<DashboardView>, ApiError> {
    run(&state, Action::RefreshStatus).await
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingsRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    state
        .controller
        .update_settings(request.port, request.number_of_requests)?;
    Ok(Json(state.controller.view()))
}

/// POST /api/servers/:variant/start
pub async fn start(
    State(state): State<Arc<AppState>>,
    Path(variant): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let variant = parse_variant(&variant)?;
    run(&state, Action::Start(variant)).await
}

/// POST /api/servers/:variant/stop
pub async fn stop(
    State(state): State<Arc<AppState>>,
    Path(variant): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let variant = parse_variant(&variant)?;
    run(&state, Action::Stop(variant)).await
}

/// POST /api/servers/:variant/test
pub async fn load_test(
    State(state): State<Arc<AppState>>,
    Path(variant): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let variant = parse_variant(&variant)?;
    run(&state, Action::RunLoadTest(variant)).await
}
