//! Shared test utilities for server lab integration tests.
//!
//! Provides a wiremock stand-in for the server-control backend and helpers
//! to build dashboard state pointed at it.

#![allow(dead_code)]

use serverlab::api::{create_router, AppState};
use serverlab::config::DashboardConfig;
use serverlab::gateway::{GatewayConfig, HttpGateway};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the mock backend serves under
pub const API_PATH: &str = "/api/servers";

pub const VARIANTS: [&str; 3] = ["Single-Threaded", "Multi-Threaded", "Thread-Pool"];

/// Base URL of the mock backend's control API
pub fn api_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), API_PATH)
}

pub fn gateway_config(server: &MockServer) -> GatewayConfig {
    GatewayConfig {
        api_url: api_url(server),
        timeout_seconds: 5,
    }
}

pub fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&gateway_config(server)).unwrap()
}

/// Dashboard state and router talking to the mock backend.
pub fn app(server: &MockServer) -> (Arc<AppState>, axum::Router) {
    app_with(server, |_| {})
}

/// Like [`app`], with `configure` applied to the config first.
pub fn app_with(
    server: &MockServer,
    configure: impl FnOnce(&mut DashboardConfig),
) -> (Arc<AppState>, axum::Router) {
    let mut config = DashboardConfig::default();
    config.gateway = gateway_config(server);
    configure(&mut config);
    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    let router = create_router(Arc::clone(&state));
    (state, router)
}

/// Mount `GET /api/servers` returning every variant.
pub async fn mount_server_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(VARIANTS))
        .mount(server)
        .await;
}

/// Mount `GET /api/servers/{variant}/status`.
pub async fn mount_status(server: &MockServer, variant: &str, running: bool) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}/status", API_PATH, variant)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "running": running })),
        )
        .mount(server)
        .await;
}

/// Mount status for every variant with the same flag.
pub async fn mount_all_status(server: &MockServer, running: bool) {
    for variant in VARIANTS {
        mount_status(server, variant, running).await;
    }
}

/// A load test result body as the backend sends it.
pub fn load_test_body(average_time: f64, requests_per_second: f64) -> serde_json::Value {
    serde_json::json!({
        "totalRequests": 100,
        "totalTime": average_time * 100.0,
        "averageTime": average_time,
        "requestsPerSecond": requests_per_second,
        "successRate": 100.0,
    })
}
