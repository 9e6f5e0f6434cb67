//! Logging via tracing + tracing-subscriber.
//!
//! The terminal is owned by the UI, so events go to a log file through a
//! non-blocking `tracing-appender` writer. `RUST_LOG` overrides the
//! configured level.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Keeps the file writer alive; dropping it flushes pending entries.
pub struct LogGuard {
    _file_guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// Returns `None` when no log file is configured: nothing is installed and
/// events are discarded.
pub fn init_logging(settings: &LoggingConfig) -> Result<Option<LogGuard>> {
    let Some(log_file) = settings.file.as_deref() else {
        return Ok(None);
    };

    let env_filter = build_env_filter(&settings.level)?;

    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log path {} has no file name", log_file.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    tracing::info!(
        level = %settings.level,
        file = %log_file.display(),
        "Logging initialized"
    );

    Ok(Some(LogGuard { _file_guard: guard }))
}

fn build_env_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level '{}'", default_level)),
    }
}
