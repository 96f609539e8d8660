//! # Dashboard HTTP surface
//!
//! Serves the embedded dashboard page and a small JSON API that drives the
//! [`DashboardController`].
//!
//! ## Endpoints
//!
//! - `GET /` - Dashboard page with the initial state injected
//! - `GET /ws` - Live `state` and `chart_update` messages
//! - `GET /api/state` - Current [`DashboardView`](crate::controller::DashboardView)
//! - `POST /api/status/refresh` - Refresh server status
//! - `PUT /api/settings` - Change the port and number of requests
//! - `POST /api/servers/:variant/{start,stop,test}` - Server actions
//! - `GET /api/chart`, `GET /api/chart.svg` - Current chart
//! - `GET /health` - Liveness
//!
//! ## Example
//!
//! ```no_run
//! use serverlab::api::{create_router, AppState};
//! use serverlab::config::DashboardConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(DashboardConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! state.controller.mount().await;
//!
//! let app = create_router(Arc::clone(&state));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4200").await?;
//! state.attach_chart();
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod health;
mod servers;

pub use error::ApiError;
pub use health::HealthResponse;
pub use servers::SettingsRequest;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::chart::{BroadcastSurface, FanoutSurface, SvgSurface};
use crate::config::DashboardConfig;
use crate::controller::DashboardController;
use crate::dashboard::types::WebSocketUpdate;
use crate::gateway::{BackendGateway, GatewayError, HttpGateway};

/// Maximum request body size (64 KB).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Buffered WebSocket updates per subscriber.
const BROADCAST_CAPACITY: usize = 256;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub controller: Arc<DashboardController>,
    pub config: Arc<DashboardConfig>,
    /// Server-side chart, served at `/api/chart.svg`
    pub svg_surface: Arc<SvgSurface>,
    /// WebSocket broadcast channel for dashboard updates
    pub ws_broadcast: broadcast::Sender<WebSocketUpdate>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state talking to the backend configured in `config.gateway`.
    pub fn new(config: Arc<DashboardConfig>) -> Result<Self, GatewayError> {
        let gateway = HttpGateway::new(&config.gateway)?;
        Ok(Self::with_gateway(Arc::new(gateway), config))
    }

    /// Create state around an existing gateway.
    pub fn with_gateway(gateway: Arc<dyn BackendGateway>, config: Arc<DashboardConfig>) -> Self {
        let (ws_broadcast, _) = broadcast::channel(BROADCAST_CAPACITY);
        let controller = DashboardController::new(gateway, config.controller_settings())
            .with_broadcast(ws_broadcast.clone());
        let svg_surface = Arc::new(SvgSurface::new(config.chart.width, config.chart.height));

        Self {
            controller: Arc::new(controller),
            config,
            svg_surface,
            ws_broadcast,
            start_time: Instant::now(),
        }
    }

    /// Attach the SVG and WebSocket chart surfaces to the controller.
    ///
    /// Returns false if a surface was already attached.
    pub fn attach_chart(&self) -> bool {
        let surface = FanoutSurface::new()
            .with(self.svg_surface.clone())
            .with(Arc::new(BroadcastSurface::new(self.ws_broadcast.clone())));
        self.controller.initialize_chart(Arc::new(surface))
    }
}

/// Create the dashboard router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = state.config.server.request_timeout();

    let mut router = Router::new()
        .route("/", get(crate::dashboard::dashboard_handler))
        .route("/assets/*path", get(crate::dashboard::assets_handler))
        .route("/ws", get(crate::dashboard::websocket_handler))
        .route("/api/state", get(servers::state))
        .route("/api/status/refresh", post(servers::refresh))
        .route("/api/settings", put(servers::update_settings))
        .route("/api/servers/:variant/start", post(servers::start))
        .route("/api/servers/:variant/stop", post(servers::stop))
        .route("/api/servers/:variant/test", post(servers::load_test))
        .route("/api/chart", get(crate::dashboard::chart_handler))
        .route("/api/chart.svg", get(crate::dashboard::chart_svg_handler))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE));

    if let Some(timeout) = timeout {
        router = router.layer(TimeoutLayer::new(timeout));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
