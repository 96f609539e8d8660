//! CLI module for the server lab dashboard
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the dashboard server
//! - `status` - Show whether each server variant is running
//! - `servers` - List the server variants the backend offers
//! - `start` / `stop` - Start or stop one server variant
//! - `test` - Run a load test against one server variant
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start the dashboard with default config
//! serverlab serve
//!
//! # Start the thread pool server and load test it
//! serverlab start thread-pool --port 8081
//! serverlab test thread-pool --requests 500
//!
//! # Generate shell completions
//! serverlab completions bash > ~/.bash_completion.d/serverlab
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod servers;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::gateway::ServerVariant;

/// Server lab - start, stop and load test demo HTTP servers
#[derive(Parser, Debug)]
#[command(
    name = "serverlab",
    version,
    about = "Live dashboard for starting, stopping and load testing demo HTTP servers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Serve(ServeArgs),
    /// Show the running status of every server variant
    Status(StatusArgs),
    /// List the server variants offered by the backend
    Servers(StatusArgs),
    /// Start a server variant
    Start(StartArgs),
    /// Stop a server variant
    Stop(StopArgs),
    /// Run a load test against a server variant
    Test(TestArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "serverlab.toml")]
    pub config: PathBuf,

    /// Override dashboard port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override dashboard host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Override the backend server-control API URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Refresh server status in the background
    #[arg(long)]
    pub poll: bool,
}

/// Where to find the backend
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "serverlab.toml")]
    pub config: PathBuf,

    /// Override the backend server-control API URL
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Server variant (single-threaded, multi-threaded, thread-pool)
    pub variant: ServerVariant,

    /// Port to start the server on (defaults to load_test.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Server variant (single-threaded, multi-threaded, thread-pool)
    pub variant: ServerVariant,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Server variant (single-threaded, multi-threaded, thread-pool)
    pub variant: ServerVariant,

    /// Port the server listens on (defaults to load_test.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of requests to send (defaults to load_test.number_of_requests)
    #[arg(short = 'n', long)]
    pub requests: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "serverlab.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["serverlab", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("serverlab.toml"));
                assert!(args.port.is_none());
                assert!(args.api_url.is_none());
                assert!(!args.poll);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "serverlab",
            "serve",
            "-p",
            "9000",
            "--api-url",
            "http://lab:8080/api/servers",
            "--poll",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.api_url.as_deref(), Some("http://lab:8080/api/servers"));
                assert!(args.poll);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_start_variant_alias() {
        let cli = Cli::try_parse_from(["serverlab", "start", "pool", "--port", "8082"]).unwrap();
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.variant, ServerVariant::ThreadPool);
                assert_eq!(args.port, Some(8082));
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_parse_test_args() {
        let cli =
            Cli::try_parse_from(["serverlab", "test", "Multi-Threaded", "-n", "250", "--json"])
                .unwrap();
        match cli.command {
            Commands::Test(args) => {
                assert_eq!(args.variant, ServerVariant::MultiThreaded);
                assert_eq!(args.requests, Some(250));
                assert!(args.port.is_none());
                assert!(args.json);
            }
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["serverlab", "stop", "quantum"]).is_err());
    }

    #[test]
    fn test_cli_parse_status_json() {
        let cli = Cli::try_parse_from(["serverlab", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert!(args.json);
                assert_eq!(args.backend.config, PathBuf::from("serverlab.toml"));
            }
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["serverlab", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
