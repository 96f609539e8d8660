//! Scripted in-memory gateway for unit tests.

use super::{
    BackendGateway, GatewayError, LoadTestResult, ServerResponse, ServerStatus, ServerVariant,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Scripted<T> = (Duration, Result<T, GatewayError>);

pub struct ScriptedGateway {
    pub servers: Mutex<Result<Vec<String>, GatewayError>>,
    /// Default status answer per variant
    pub statuses: Mutex<HashMap<ServerVariant, Result<bool, GatewayError>>>,
    /// One-shot answers consumed before falling back to `statuses`
    pub status_queue: Mutex<HashMap<ServerVariant, VecDeque<Scripted<bool>>>>,
    pub start_result: Mutex<Result<ServerResponse, GatewayError>>,
    pub stop_result: Mutex<Result<ServerResponse, GatewayError>>,
    pub load_test_result: Mutex<Result<LoadTestResult, GatewayError>>,
    pub load_test_delay: Mutex<Duration>,
    /// Flip a variant's default status when start/stop succeed
    pub track_running: bool,
    pub list_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub load_test_calls: AtomicUsize,
    pub last_start_port: Mutex<Option<u16>>,
    pub last_load_test: Mutex<Option<(u16, u32)>>,
}

pub fn load_test_result(average_time: f64, requests_per_second: f64) -> LoadTestResult {
    LoadTestResult {
        total_requests: 100,
        total_time: average_time * 100.0,
        average_time,
        requests_per_second,
        success_rate: 100.0,
    }
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            servers: Mutex::new(Ok(ServerVariant::ALL
                .iter()
                .map(|v| v.name().to_string())
                .collect())),
            statuses: Mutex::new(ServerVariant::ALL.iter().map(|v| (*v, Ok(false))).collect()),
            status_queue: Mutex::new(HashMap::new()),
            start_result: Mutex::new(Ok(ServerResponse {
                message: Some("started".to_string()),
            })),
            stop_result: Mutex::new(Ok(ServerResponse {
                message: Some("stopped".to_string()),
            })),
            load_test_result: Mutex::new(Ok(load_test_result(5.0, 200.0))),
            load_test_delay: Mutex::new(Duration::ZERO),
            track_running: true,
            list_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            load_test_calls: AtomicUsize::new(0),
            last_start_port: Mutex::new(None),
            last_load_test: Mutex::new(None),
        }
    }

    pub fn set_status(&self, variant: ServerVariant, result: Result<bool, GatewayError>) {
        self.statuses.lock().unwrap().insert(variant, result);
    }

    pub fn queue_status(&self, variant: ServerVariant, delay: Duration, result: Result<bool, GatewayError>) {
        self.status_queue
            .lock()
            .unwrap()
            .entry(variant)
            .or_default()
            .push_back((delay, result));
    }
}

#[async_trait]
impl BackendGateway for ScriptedGateway {
    async fn list_servers(&self) -> Result<Vec<String>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.servers.lock().unwrap().clone()
    }

    async fn status(&self, variant: ServerVariant) -> Result<ServerStatus, GatewayError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self
            .status_queue
            .lock()
            .unwrap()
            .get_mut(&variant)
            .and_then(VecDeque::pop_front);

        let result = match queued {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => self
                .statuses
                .lock()
                .unwrap()
                .get(&variant)
                .cloned()
                .unwrap_or(Ok(false)),
        };
        result.map(|running| ServerStatus { running })
    }

    async fn start(&self, variant: ServerVariant, port: u16) -> Result<ServerResponse, GatewayError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_start_port.lock().unwrap() = Some(port);
        let result = self.start_result.lock().unwrap().clone();
        if result.is_ok() && self.track_running {
            self.set_status(variant, Ok(true));
        }
        result
    }

    async fn stop(&self, variant: ServerVariant) -> Result<ServerResponse, GatewayError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.stop_result.lock().unwrap().clone();
        if result.is_ok() && self.track_running {
            self.set_status(variant, Ok(false));
        }
        result
    }

    async fn run_load_test(
        &self,
        _variant: ServerVariant,
        port: u16,
        number_of_requests: u32,
    ) -> Result<LoadTestResult, GatewayError> {
        self.load_test_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_load_test.lock().unwrap() = Some((port, number_of_requests));
        let delay = *self.load_test_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.load_test_result.lock().unwrap().clone()
    }
}
