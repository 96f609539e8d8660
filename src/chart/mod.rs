//! Live dual-axis chart.
//!
//! Projects the rolling window of load test samples into a [`ChartFrame`]:
//! one x-axis of labels and two independently scaled y-axes (response time
//! on the left, throughput on the right). The frame is then drawn on
//! whatever [`ChartSurface`] the renderer was initialized with.

mod broadcast;
mod config;
mod svg;

pub use broadcast::{BroadcastSurface, FanoutSurface};
pub use config::ChartConfig;
pub use svg::{render_svg, SvgSurface};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::dashboard::types::LoadTestSample;

pub const RESPONSE_TIME_LABEL: &str = "Average Response Time (ms)";
pub const THROUGHPUT_LABEL: &str = "Requests per Second";

const RESPONSE_TIME_COLOR: &str = "rgba(75, 192, 192, 1)";
const THROUGHPUT_COLOR: &str = "rgba(255, 99, 132, 1)";

/// Intervals between axis ticks
const TICK_INTERVALS: u32 = 5;

/// Errors raised while drawing a chart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// No drawable surface has been attached yet
    #[error("chart surface not available")]
    SurfaceUnavailable,

    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// Something a chart frame can be drawn on.
pub trait ChartSurface: Send + Sync + 'static {
    /// Replace whatever is drawn with `frame`.
    fn draw(&self, frame: &ChartFrame) -> Result<(), RenderError>;
}

/// Side of the plot an axis is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Left,
    Right,
}

/// A linear y-axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: String,
    pub title: String,
    pub position: AxisPosition,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    /// Whether grid lines are drawn across the plot area
    pub grid: bool,
}

impl Axis {
    fn scaled(id: &str, title: &str, position: AxisPosition, values: &[f64], grid: bool) -> Self {
        let peak = values.iter().copied().fold(0.0_f64, f64::max);
        let max = nice_ceiling(peak);
        let ticks = (0..=TICK_INTERVALS)
            .map(|i| max * f64::from(i) / f64::from(TICK_INTERVALS))
            .collect();

        Self {
            id: id.to_string(),
            title: title.to_string(),
            position,
            min: 0.0,
            max,
            ticks,
            grid,
        }
    }
}

/// One line on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    /// Id of the y-axis this series is scaled against
    pub axis_id: String,
    pub values: Vec<f64>,
}

/// Everything needed to draw the chart once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub labels: Vec<String>,
    pub response_time: Series,
    pub throughput: Series,
    pub left_axis: Axis,
    pub right_axis: Axis,
}

impl ChartFrame {
    /// Derive the frame from samples, oldest first.
    pub fn from_samples(samples: &[LoadTestSample]) -> Self {
        let labels = samples.iter().map(LoadTestSample::label).collect();
        let response_times: Vec<f64> = samples.iter().map(|s| s.average_time_ms).collect();
        let throughputs: Vec<f64> = samples.iter().map(|s| s.requests_per_second).collect();

        let left_axis = Axis::scaled("y", RESPONSE_TIME_LABEL, AxisPosition::Left, &response_times, true);
        let right_axis = Axis::scaled("y1", THROUGHPUT_LABEL, AxisPosition::Right, &throughputs, false);

        Self {
            labels,
            response_time: Series {
                label: RESPONSE_TIME_LABEL.to_string(),
                color: RESPONSE_TIME_COLOR.to_string(),
                axis_id: left_axis.id.clone(),
                values: response_times,
            },
            throughput: Series {
                label: THROUGHPUT_LABEL.to_string(),
                color: THROUGHPUT_COLOR.to_string(),
                axis_id: right_axis.id.clone(),
                values: throughputs,
            },
            left_axis,
            right_axis,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self::from_samples(&[])
    }
}

/// Smallest 1/2/2.5/5 x 10^k value that is >= `value`; 1.0 for empty data.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let base = 10f64.powf(value.log10().floor());
    let fraction = value / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    // Rounding in the division can leave the product one ulp short
    (nice * base).max(value)
}

/// Keeps the current frame and draws it on the attached surface.
///
/// Rendering before a surface exists records the frame and does nothing else.
#[derive(Default)]
pub struct ChartRenderer {
    surface: Option<Arc<dyn ChartSurface>>,
    frame: ChartFrame,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the drawable surface. Returns false if one was already attached.
    pub fn initialize(&mut self, surface: Arc<dyn ChartSurface>) -> bool {
        if self.surface.is_some() {
            tracing::debug!("Chart surface already initialized");
            return false;
        }
        self.surface = Some(surface);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// Replace the chart with a frame built from `samples`.
    pub fn render(&mut self, samples: &[LoadTestSample]) -> &ChartFrame {
        self.frame = ChartFrame::from_samples(samples);

        match &self.surface {
            Some(surface) => {
                if let Err(e) = surface.draw(&self.frame) {
                    tracing::warn!(error = %e, "Chart draw failed");
                }
            }
            None => {
                tracing::debug!(
                    error = %RenderError::SurfaceUnavailable,
                    points = self.frame.len(),
                    "Chart not initialized, skipping draw"
                );
            }
        }

        &self.frame
    }

    /// Last rendered frame
    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }
}
