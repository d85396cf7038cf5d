//! Logging configuration using the tracing ecosystem.
//!
//! Standard output carries the JSON result and standard error the single
//! `Error:` line, so diagnostics go to a log file instead:
//! - Daily log rotation
//! - Environment-based log level configuration
//! - Span-based context for API requests

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "backlog=info,warn";

/// Overrides the log directory.
pub const LOG_DIR_VAR: &str = "BACKLOG_LOG_DIR";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender and log level
/// configuration via the `RUST_LOG` environment variable.
///
/// # Log Directory
///
/// `BACKLOG_LOG_DIR` when set, otherwise the platform-specific local data
/// directory with `backlog-cli/logs` appended:
/// - Linux: `~/.local/share/backlog-cli/logs/`
/// - macOS: `~/Library/Application Support/backlog-cli/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\backlog-cli\logs\`
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory(std::env::var_os(LOG_DIR_VAR).map(PathBuf::from))?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("backlog")
        .filename_suffix("log")
        .build(&log_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), log_dir = %log_dir.display(), "backlog-cli starting");

    Ok(())
}

/// Get the log directory path.
///
/// An explicit override wins over the local data directory.
fn get_log_directory(override_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("backlog-cli").join("logs"))
}
