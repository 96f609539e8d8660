//! Server lab - live dashboard for demo HTTP server variants
//!
//! Starts and stops the single-threaded, multi-threaded and thread-pool
//! demo servers through a backend control API, runs load tests against
//! them, and charts the last few results on a dual-axis chart.

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod gateway;
pub mod logging;
pub mod poller;
