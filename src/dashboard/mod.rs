//! Web dashboard for the server lab
//!
//! Provides an embedded web dashboard served at `/` that displays:
//! - Running status of each server variant with start/stop controls
//! - Load test form (port, number of requests) and the latest result
//! - Dual-axis chart of the last ten load tests
//!
//! Uses WebSocket for real-time updates with automatic fallback to polling.

pub mod handler;
pub mod types;
pub mod websocket;
pub mod window;

pub use handler::{assets_handler, chart_handler, chart_svg_handler, dashboard_handler};
pub use websocket::websocket_handler;
