//! `serverlab config` subcommands

use crate::cli::ConfigInitArgs;
use crate::config::DashboardConfig;

/// Annotated default configuration shipped with the binary
pub const EXAMPLE_CONFIG: &str = include_str!("../../serverlab.example.toml");

/// Write the example configuration to `args.output`, refusing to clobber an
/// existing file unless `--force` is given.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<String, Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists (pass --force to replace it)",
            args.output.display()
        )
        .into());
    }

    std::fs::write(&args.output, EXAMPLE_CONFIG)?;
    tracing::debug!(path = %args.output.display(), "Wrote example config");

    let api_url = DashboardConfig::default().gateway.api_url;
    Ok(format!(
        "✓ Wrote {}\n  Backend: {} (edit gateway.api_url to change), then run `serverlab serve`",
        args.output.display(),
        api_url
    ))
}
