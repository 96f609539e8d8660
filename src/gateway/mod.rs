//! Backend gateway client.
//!
//! The demo servers and the load generator run in a separate backend service.
//! This module is the only place that talks to it: one async operation per
//! backend capability, each returning a typed payload or a [`GatewayError`].
//!
//! ## Endpoints
//!
//! - `GET {base}` - list available server variants
//! - `GET {base}/{variant}/status` - `{running}`
//! - `POST {base}/{variant}/start?port={n}` - `{message}` or `{error}`
//! - `POST {base}/{variant}/stop` - `{message}` or `{error}`
//! - `POST {base}/{variant}/test` - load test result

mod config;
mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use types::{
    LoadTestRequest, LoadTestResult, ServerResponse, ServerStatus, ServerVariant,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Operations the dashboard needs from the demo-server backend.
///
/// Object safe; used as `Arc<dyn BackendGateway>`. Every method is
/// cancellation safe: dropping the future abandons the in-flight request
/// and nothing else happens.
#[async_trait]
pub trait BackendGateway: Send + Sync + 'static {
    /// Names of the server variants the backend can run.
    async fn list_servers(&self) -> Result<Vec<String>, GatewayError>;

    /// Whether `variant` is currently running.
    async fn status(&self, variant: ServerVariant) -> Result<ServerStatus, GatewayError>;

    /// Start `variant` listening on `port` (1-65535).
    async fn start(&self, variant: ServerVariant, port: u16)
        -> Result<ServerResponse, GatewayError>;

    /// Stop `variant`.
    async fn stop(&self, variant: ServerVariant) -> Result<ServerResponse, GatewayError>;

    /// Fire `number_of_requests` requests at `variant` on `port` and report.
    async fn run_load_test(
        &self,
        variant: ServerVariant,
        port: u16,
        number_of_requests: u32,
    ) -> Result<LoadTestResult, GatewayError>;
}

/// Structured error payload returned by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    error: serde_json::Value,
}

/// reqwest implementation of [`BackendGateway`].
pub struct HttpGateway {
    base_url: String,
    client: Client,
    timeout_seconds: u64,
}

impl HttpGateway {
    /// Build a gateway with its own pooled client.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder().pool_max_idle_per_host(4);
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        Ok(Self::with_client(config, client))
    }

    /// Build a gateway around an existing client (for testing).
    pub fn with_client(config: &GatewayConfig, client: Client) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
            timeout_seconds: config.timeout_seconds,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn variant_url(&self, variant: ServerVariant, action: &str) -> String {
        format!("{}/{}/{}", self.base_url, variant.name(), action)
    }

    fn classify_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.timeout_seconds)
        } else {
            GatewayError::Connectivity(e.to_string())
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(StatusCode, String), GatewayError> {
        let response = request.send().await.map_err(|e| self.classify_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify_error(e))?;
        Ok((status, body))
    }
}

/// Extract the backend's `error` detail, if the body carries one.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.error {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Decode a backend reply.
///
/// A structured `{error}` body wins over the status code, so a 200 carrying
/// an error is still reported as a server error.
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, GatewayError> {
    if let Some(detail) = error_detail(body) {
        return Err(GatewayError::Server { detail });
    }
    if !status.is_success() {
        return Err(GatewayError::Server {
            detail: format!("HTTP {}", status),
        });
    }
    serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

/// Like [`parse_body`], but an empty 2xx body is an empty message.
fn parse_message(status: StatusCode, body: &str) -> Result<ServerResponse, GatewayError> {
    if status.is_success() && body.trim().is_empty() {
        return Ok(ServerResponse::default());
    }
    parse_body(status, body)
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_servers(&self) -> Result<Vec<String>, GatewayError> {
        tracing::debug!(url = %self.base_url, "Listing available servers");
        let (status, body) = self.send(self.client.get(&self.base_url)).await?;
        parse_body(status, &body)
    }

    async fn status(&self, variant: ServerVariant) -> Result<ServerStatus, GatewayError> {
        let url = self.variant_url(variant, "status");
        tracing::debug!(variant = %variant, url = %url, "Fetching server status");
        let (status, body) = self.send(self.client.get(&url)).await?;
        parse_body(status, &body)
    }

    async fn start(
        &self,
        variant: ServerVariant,
        port: u16,
    ) -> Result<ServerResponse, GatewayError> {
        if port == 0 {
            return Err(GatewayError::InvalidArgument(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        let url = self.variant_url(variant, "start");
        tracing::debug!(variant = %variant, port, url = %url, "Starting server");
        let request = self
            .client
            .post(&url)
            .query(&[("port", port)])
            .json(&serde_json::json!({}));
        let (status, body) = self.send(request).await?;
        parse_message(status, &body)
    }

    async fn stop(&self, variant: ServerVariant) -> Result<ServerResponse, GatewayError> {
        let url = self.variant_url(variant, "stop");
        tracing::debug!(variant = %variant, url = %url, "Stopping server");
        let request = self.client.post(&url).json(&serde_json::json!({}));
        let (status, body) = self.send(request).await?;
        parse_message(status, &body)
    }

    async fn run_load_test(
        &self,
        variant: ServerVariant,
        port: u16,
        number_of_requests: u32,
    ) -> Result<LoadTestResult, GatewayError> {
        if port == 0 {
            return Err(GatewayError::InvalidArgument(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        if number_of_requests == 0 {
            return Err(GatewayError::InvalidArgument(
                "number of requests must be positive".to_string(),
            ));
        }
        let url = self.variant_url(variant, "test");
        tracing::debug!(
            variant = %variant,
            port,
            number_of_requests,
            url = %url,
            "Running load test"
        );
        let request = self.client.post(&url).json(&LoadTestRequest {
            port,
            number_of_requests,
        });
        let (status, body) = self.send(request).await?;
        parse_body(status, &body)
    }
}
