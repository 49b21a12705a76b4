//! Watchlog CLI - watchlog command

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;
use watchlog_cli::{logging, signals, SessionConfig, WatchSupervisor, DEFAULT_OUTPUT_FILE};

/// Watchlog - audit trail of changes to one file or directory
#[derive(Parser)]
#[command(name = "watchlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File or directory to watch
    path: PathBuf,

    /// Stop after this many seconds (0 or omitted: run until interrupted)
    duration_seconds: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            println!("No file to track");
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    logging::init();

    let shutdown = CancellationToken::new();
    signals::install(shutdown.clone()).context("Failed to install signal handlers")?;

    let config = SessionConfig::new(cli.path)
        .output_path(DEFAULT_OUTPUT_FILE)
        .limit_secs(cli.duration_seconds.unwrap_or(0));

    let report = WatchSupervisor::new(config, shutdown)
        .run()
        .await
        .context("Watch session failed")?;

    info!(
        "Session finished ({:?}), {} entries written",
        report.stop_reason, report.entries_written
    );
    Ok(())
}
