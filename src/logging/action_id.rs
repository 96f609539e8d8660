//! Correlation IDs for dashboard actions

use uuid::Uuid;

/// Generate a new action ID using UUID v4
///
/// Every controller action runs in a span carrying one of these, so the
/// gateway calls, status refreshes and chart redraws it triggers can be
/// grouped in the logs.
///
/// # Examples
///
/// ```
/// use serverlab::logging::generate_action_id;
///
/// let action_id = generate_action_id();
/// assert!(!action_id.is_empty());
/// ```
pub fn generate_action_id() -> String {
    Uuid::new_v4().to_string()
}
