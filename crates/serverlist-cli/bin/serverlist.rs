//! Server list editor binary entry point.
//!
//! This is a thin wrapper around the serverlist-cli library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Runs the selected command

use anyhow::Result;
use serverlist_cli::{Cli, run};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Using server list {}", cli.config().file_path().display());

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
