//! Log file setup.
//!
//! Every component logs through `tracing` macros. [`init`] installs a
//! subscriber that appends to a log file through a non-blocking writer and,
//! in verbose mode, mirrors the same lines to stderr. When the log file
//! cannot be opened, logging goes to stderr only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// File name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "pomodoro.log";

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file to append to
    pub path: PathBuf,
    /// Use debug level and mirror output to stderr
    pub verbose: bool,
}

impl LogConfig {
    pub fn new(path: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            path: path.into(),
            verbose,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(default_log_path(), false)
    }
}

/// Keeps the background log writer alive.
///
/// Buffered lines are flushed when the guard is dropped, so it must be held
/// until the process exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    worker: Option<WorkerGuard>,
}

impl LogGuard {
    /// Returns true if log lines go to the log file.
    pub fn is_file_backed(&self) -> bool {
        self.worker.is_some()
    }
}

/// Returns the default log file location.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("pomodoro-timer").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

/// Default filter directive for the given verbosity.
pub fn level_for(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the level chosen from `config.verbose`. If the log
/// file cannot be opened a stderr-only subscriber is installed instead and
/// a warning is logged.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(config.verbose)));

    let appender = match open_log_file(&config.path) {
        Ok(appender) => appender,
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init()
                .context("failed to install the log subscriber")?;
            tracing::warn!("{:#}; logging to stderr only", e);
            return Ok(LogGuard { worker: None });
        }
    };
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer);
    let stderr_layer = config
        .verbose
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install the log subscriber")?;

    tracing::info!(path = %config.path.display(), verbose = config.verbose, "Logging initialized");
    Ok(LogGuard {
        worker: Some(worker),
    })
}

/// Creates the log directory and opens the log file for appending.
fn open_log_file(path: &Path) -> Result<RollingFileAppender> {
    let (dir, file_name) = split_log_path(path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("log path {} has no usable file name", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
