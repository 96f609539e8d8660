//! HTTP handlers for dashboard routes

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use rust_embed::RustEmbed;
use std::sync::Arc;

use crate::api::AppState;

/// Placeholder in index.html replaced with the initial dashboard state
const INITIAL_DATA_SLOT: &str = r#"<script id="initial-data" type="application/json">{}</script>"#;

/// Embedded dashboard assets from dashboard/ directory
#[derive(RustEmbed)]
#[folder = "dashboard/"]
struct DashboardAssets;

/// Serves the main dashboard HTML page with injected initial data
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(content) = DashboardAssets::get("index.html") else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard HTML not found").into_response();
    };
    let html = match std::str::from_utf8(&content.data) {
        Ok(html) => html,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid HTML encoding").into_response()
        }
    };

    let view = state.controller.view();
    let initial_data = serde_json::to_string(&view)
        .unwrap_or_else(|_| "{}".to_string())
        // Keep the payload from closing the script element early
        .replace("</", "<\\/");

    let updated_html = html.replace(
        INITIAL_DATA_SLOT,
        &format!(
            r#"<script id="initial-data" type="application/json">{}</script>"#,
            initial_data
        ),
    );

    Html(updated_html).into_response()
}

/// Serves static assets (CSS, JS, etc.)
pub async fn assets_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let body = content.data;
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

            ([(header::CONTENT_TYPE, mime_type.as_ref())], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

/// GET /api/chart - current chart frame
pub async fn chart_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(state.controller.chart_frame()).into_response()
}

/// GET /api/chart.svg - latest drawn chart, 204 until the first draw
pub async fn chart_svg_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.svg_surface.document() {
        Some(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::gateway::testing::ScriptedGateway;
    use crate::gateway::ServerVariant;

    fn test_state() -> Arc<AppState> {
        let config = Arc::new(DashboardConfig::default());
        Arc::new(AppState::with_gateway(Arc::new(ScriptedGateway::new()), config))
    }

    #[test]
    fn test_index_has_initial_data_slot() {
        let content = DashboardAssets::get("index.html").unwrap();
        let html = std::str::from_utf8(&content.data).unwrap();
        assert!(html.contains(INITIAL_DATA_SLOT));
    }

    #[tokio::test]
    async fn test_dashboard_handler_injects_state() {
        let state = test_state();
        state.controller.mount().await;

        let response = dashboard_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.contains("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("\"serverTypes\":[\"Single-Threaded\""));
        assert!(html.contains("\"selectedPort\":8081"));
    }

    #[tokio::test]
    async fn test_assets_handler_unknown_asset() {
        let response = assets_handler(Path("totally_nonexistent_file_xyz.wasm".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assets_handler_serves_css() {
        let response = assets_handler(Path("styles.css".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ct = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("css"), "Expected CSS content type, got: {}", ct);
    }

    #[tokio::test]
    async fn test_assets_handler_serves_js() {
        let response = assets_handler(Path("dashboard.js".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ct = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("javascript"), "Expected JS content type, got: {}", ct);
    }

    #[tokio::test]
    async fn test_chart_svg_no_content_before_first_draw() {
        let response = chart_svg_handler(State(test_state())).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_chart_svg_after_load_test() {
        let state = test_state();
        state.attach_chart();
        state.controller.run_load_test(ServerVariant::SingleThreaded).await;

        let response = chart_svg_handler(State(Arc::clone(&state))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let svg = String::from_utf8(body.to_vec()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Single-Threaded ("));
    }

    #[tokio::test]
    async fn test_chart_handler_returns_frame() {
        let state = test_state();
        state.controller.run_load_test(ServerVariant::ThreadPool).await;

        let response = chart_handler(State(state)).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let frame: crate::chart::ChartFrame = serde_json::from_slice(&body).unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.right_axis.id, "y1");
    }
}
