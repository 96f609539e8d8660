//! Chart configuration

use serde::{Deserialize, Serialize};

use crate::dashboard::window::DEFAULT_WINDOW_SIZE;

/// Live chart settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of most recent load tests kept on the chart
    pub window_size: usize,
    /// SVG width in pixels
    pub width: u32,
    /// SVG height in pixels
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            width: 900,
            height: 420,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_config_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.window_size, 10);
        assert_eq!(config.width, 900);
        assert_eq!(config.height, 420);
    }
}
