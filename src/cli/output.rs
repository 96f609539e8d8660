//! Output formatting helpers for CLI commands

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

use crate::gateway::{LoadTestResult, ServerVariant};
use crate::poller::StatusRecord;

/// Format server status as a table
pub fn format_status_table(record: &StatusRecord) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Server", "Status"]);

    for (variant, running) in record.iter() {
        let status_str = if running {
            "Running".green().to_string()
        } else {
            "Stopped".red().to_string()
        };
        table.add_row(vec![
            Cell::new(format!("{} {}", status_icon(running), variant)),
            Cell::new(status_str),
        ]);
    }

    table.to_string()
}

/// Format server status as JSON
pub fn format_status_json(record: &StatusRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "status": record }))
}

/// Format the backend's server list as a table
pub fn format_servers_table(servers: &[String]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Server", "CLI name"]);

    for name in servers {
        let cli_name = match name.parse::<ServerVariant>() {
            Ok(variant) => variant.name().to_lowercase(),
            Err(_) => "(unknown)".yellow().to_string(),
        };
        table.add_row(vec![Cell::new(name), Cell::new(cli_name)]);
    }

    table.to_string()
}

/// Format the backend's server list as JSON
pub fn format_servers_json(servers: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "servers": servers }))
}

/// Format a load test result as a table
pub fn format_load_test_table(variant: ServerVariant, result: &LoadTestResult) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![format!("{} load test", variant), "Value".to_string()]);

    table.add_row(vec![Cell::new("Total Requests"), Cell::new(result.total_requests)]);
    table.add_row(vec![
        Cell::new("Total Time"),
        Cell::new(format!("{:.2} ms", result.total_time)),
    ]);
    table.add_row(vec![
        Cell::new("Average Response Time"),
        Cell::new(format!("{:.2} ms", result.average_time)),
    ]);
    table.add_row(vec![
        Cell::new("Requests per Second"),
        Cell::new(format!("{:.2}", result.requests_per_second)),
    ]);
    table.add_row(vec![
        Cell::new("Success Rate"),
        Cell::new(format!("{:.2}%", result.success_rate)),
    ]);

    table.to_string()
}

/// Format a load test result as JSON
pub fn format_load_test_json(
    variant: ServerVariant,
    result: &LoadTestResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "serverType": variant,
        "result": result,
    }))
}

/// Get status icon for a running flag
pub fn status_icon(running: bool) -> &'static str {
    if running {
        "✓"
    } else {
        "✗"
    }
}
