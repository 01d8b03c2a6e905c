use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sgen_cli::commands::segment;
use sgen_cli::{Cli, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;

    // Initialize tracing with debug flag support
    let filter = if settings.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!(?settings, "loaded configuration");

    let stdout = std::io::stdout();
    segment::run(
        &mut stdout.lock(),
        &cli.source,
        cli.output.as_deref(),
        &settings,
    )
}
