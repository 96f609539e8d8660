//! Surfaces that forward frames to other consumers

use std::sync::Arc;
use tokio::sync::broadcast;

use super::{ChartFrame, ChartSurface, RenderError};
use crate::dashboard::types::WebSocketUpdate;
use crate::dashboard::websocket::create_chart_update;

/// Publishes every frame to connected dashboard browsers.
pub struct BroadcastSurface {
    sender: broadcast::Sender<WebSocketUpdate>,
}

impl BroadcastSurface {
    pub fn new(sender: broadcast::Sender<WebSocketUpdate>) -> Self {
        Self { sender }
    }
}

impl ChartSurface for BroadcastSurface {
    fn draw(&self, frame: &ChartFrame) -> Result<(), RenderError> {
        // No receivers is fine; the next browser fetches /api/chart on load.
        let _ = self.sender.send(create_chart_update(frame));
        Ok(())
    }
}

/// Draws the same frame on several surfaces.
#[derive(Default)]
pub struct FanoutSurface {
    surfaces: Vec<Arc<dyn ChartSurface>>,
}

impl FanoutSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, surface: Arc<dyn ChartSurface>) -> Self {
        self.surfaces.push(surface);
        self
    }
}

impl ChartSurface for FanoutSurface {
    /// Every surface is drawn even if an earlier one fails; the first error is returned.
    fn draw(&self, frame: &ChartFrame) -> Result<(), RenderError> {
        let mut first_error = None;
        for surface in &self.surfaces {
            if let Err(e) = surface.draw(frame) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
