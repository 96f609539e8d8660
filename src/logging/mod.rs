//! Structured logging helpers
//!
//! Filter construction for the tracing subscriber and correlation IDs for
//! dashboard actions.

pub mod action_id;

pub use action_id::generate_action_id;

use crate::config::LoggingConfig;

/// Render the base level followed by one `serverlab::<component>=<level>`
/// directive per configured component, in component order.
///
/// # Examples
///
/// ```
/// use serverlab::config::{LogFormat, LoggingConfig};
/// use serverlab::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("gateway".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels,
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,serverlab::gateway=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    config
        .component_levels
        .iter()
        .fold(config.level.clone(), |mut directives, (component, level)| {
            directives.push_str(&format!(",serverlab::{}={}", component, level));
            directives
        })
}
