//! One-shot backend commands: status, servers, start, stop, test

use crate::cli::output::{
    format_load_test_json, format_load_test_table, format_servers_json, format_servers_table,
    format_status_json, format_status_table,
};
use crate::cli::{BackendArgs, StartArgs, StatusArgs, StopArgs, TestArgs};
use crate::config::DashboardConfig;
use crate::gateway::{BackendGateway, HttpGateway, ServerVariant};
use crate::poller::StatusPoller;
use std::sync::Arc;

/// Load the config file (if present) with env and CLI overrides applied.
pub fn load_backend_config(
    args: &BackendArgs,
) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        DashboardConfig::load(Some(&args.config))?
    } else {
        DashboardConfig::default()
    };
    config = config.with_env_overrides();
    if let Some(ref url) = args.api_url {
        config.gateway.api_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn connect(args: &BackendArgs) -> Result<(DashboardConfig, HttpGateway), Box<dyn std::error::Error>> {
    let config = load_backend_config(args)?;
    let gateway = HttpGateway::new(&config.gateway)?;
    tracing::debug!(api_url = %gateway.base_url(), "Using backend");
    Ok((config, gateway))
}

/// Handle `serverlab status`
pub async fn handle_status(args: &StatusArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (_, gateway) = connect(&args.backend)?;
    let poller = StatusPoller::new(Arc::new(gateway));

    let record = poller
        .refresh(&ServerVariant::ALL)
        .await
        .map_err(|e| format!("Failed to fetch server status: {}", e))?;

    if args.json {
        Ok(format_status_json(&record)?)
    } else {
        Ok(format_status_table(&record))
    }
}

/// Handle `serverlab servers`
pub async fn handle_servers(args: &StatusArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (_, gateway) = connect(&args.backend)?;

    let servers = gateway
        .list_servers()
        .await
        .map_err(|e| format!("Failed to fetch server types: {}", e.detail()))?;

    if args.json {
        Ok(format_servers_json(&servers)?)
    } else {
        Ok(format_servers_table(&servers))
    }
}

/// Handle `serverlab start`
pub async fn handle_start(args: &StartArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (config, gateway) = connect(&args.backend)?;
    let port = args.port.unwrap_or(config.load_test.port);

    let response = gateway.start(args.variant, port).await.map_err(|e| {
        format!("Failed to start {} server: {}", args.variant, e.detail())
    })?;

    let mut output = format!("✓ Started {} server on port {}", args.variant, port);
    if let Some(message) = response.message {
        output.push_str(&format!("\n  {}", message));
    }
    Ok(output)
}

/// Handle `serverlab stop`
pub async fn handle_stop(args: &StopArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (_, gateway) = connect(&args.backend)?;

    let response = gateway
        .stop(args.variant)
        .await
        .map_err(|e| format!("Failed to stop {} server: {}", args.variant, e.detail()))?;

    let mut output = format!("✓ Stopped {} server", args.variant);
    if let Some(message) = response.message {
        output.push_str(&format!("\n  {}", message));
    }
    Ok(output)
}

/// Handle `serverlab test`
pub async fn handle_test(args: &TestArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (config, gateway) = connect(&args.backend)?;
    let port = args.port.unwrap_or(config.load_test.port);
    let requests = args.requests.unwrap_or(config.load_test.number_of_requests);

    let result = gateway
        .run_load_test(args.variant, port, requests)
        .await
        .map_err(|e| format!("Failed to run load test: {}", e.detail()))?;

    if args.json {
        Ok(format_load_test_json(args.variant, &result)?)
    } else {
        Ok(format_load_test_table(args.variant, &result))
    }
}
