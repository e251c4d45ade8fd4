// til - Today I learned
//
// A terminal client for a shared board of short facts. Facts live in a
// hosted table reached over its REST interface; anyone can post one and vote
// on the others.
//
// Architecture:
// - Store (reqwest): FactStore trait with REST and in-memory backends
// - TUI (ratatui): category sidebar, fact list, submission form
// - Event system: each store call runs as a task and reports back over mpsc
// - CLI (clap): headless list/add/vote and config management

mod cli;
mod config;
mod demo;
mod events;
mod facts;
mod logging;
mod store;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig, VERSION};
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use store::{FactStore, RestFactStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never touches the store or logging
    if let Some(Commands::Config {
        show,
        reset,
        edit,
        path,
    }) = cli.command
    {
        return cli::handle_config(show, reset, edit, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    config.demo_mode |= cli.demo;

    let tui_mode = cli.command.is_none();
    let log_buffer = LogBuffer::new();

    // The guard must live until exit so buffered file logs are flushed
    let _file_guard = init_tracing(&config.logging, tui_mode, &log_buffer);

    tracing::info!("til v{} starting", VERSION);

    let store = build_store(&config)?;
    tracing::debug!("Using {} store", store.name());

    match cli.command {
        Some(command) => {
            let mut stdout = std::io::stdout();
            cli::run_command(command, store.as_ref(), &config, &mut stdout).await
        }
        None => tui::run_tui(store, config, log_buffer).await,
    }
}

/// Initialize tracing/logging
///
/// In TUI mode logs are captured to the in-memory buffer (writing to the
/// terminal would garble the display); headless commands log to stderr.
/// File logging optionally adds rotating JSON files on top of either.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    logging: &LoggingConfig,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<WorkerGuard> {
    let default_filter = format!("til={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_mode.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!tui_mode).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking rolling file writer, when file logging is enabled
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        // Fall back to non-file logging
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(file_appender))
}

/// Pick the backend: seeded in-memory board in demo mode, hosted table otherwise
fn build_store(config: &Config) -> Result<Arc<dyn FactStore>> {
    if config.demo_mode {
        tracing::info!("Demo mode: using the seeded in-memory board");
        return Ok(Arc::new(demo::demo_store()));
    }

    let store = RestFactStore::new(&config.rest_config())
        .context("Hosted store is not configured (or run with --demo to try it out)")?;
    Ok(Arc::new(store))
}
