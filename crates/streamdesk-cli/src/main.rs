//! Streamdesk - command-line admin console for the livestream gifting platform.
//!
//! Signs in against the admin API, keeps the token pair in a session file,
//! and exposes every admin area as a subcommand.

mod cli;
mod commands;
mod output;

use std::io;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

// ============================================================================
// Constants
// ============================================================================

/// Log file name used when `--log-file` names a directory
const DEFAULT_LOG_FILE: &str = "streamdesk.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr unless a log file is given, in which case they are
/// written to a daily-rotated file. The returned guard flushes the file
/// writer on drop and must live until exit.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
        return None;
    };

    let (directory, file_name) = if path.is_dir() {
        (path, Path::new(DEFAULT_LOG_FILE))
    } else {
        (
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .map(Path::new)
                .unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE)),
        )
    };

    let appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref());
    info!("streamdesk starting");

    commands::run(cli).await
}
