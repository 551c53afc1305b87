//! Logging setup built on `tracing-subscriber`.
//!
//! Console output is always enabled. When a log directory is configured, the
//! same events are also appended to a per-run file named after the start time.

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Errors raised while installing the global logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to create log directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file '{}': {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Global logger is already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Application name, used as the log file prefix
    pub app_name: String,
    /// Filter used when `RUST_LOG` is not set (e.g. "info", "hiroba_tap=debug")
    pub default_level: String,
    /// Directory for the per-run log file (console only when `None`)
    pub log_dir: Option<PathBuf>,
}

impl LoggerConfig {
    pub fn new(app_name: impl Into<String>, default_level: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            default_level: default_level.into(),
            log_dir: None,
        }
    }

    /// Also write logs to a file under `dir`
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Wall clock formatter (`HH:MM:SS`, local time)
struct ClockTime;

impl FormatTime for ClockTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S"))
    }
}

/// Build the log file name for a run started at `started_at`.
///
/// Format: `<app_name>_YYYYMMDD_HHMMSS.log`, with `-` in the app name
/// written as `_` (`hiroba-tap` logs to `hiroba_tap_...`).
pub fn log_file_name(app_name: &str, started_at: DateTime<Local>) -> String {
    format!(
        "{}_{}.log",
        app_name.replace('-', "_"),
        started_at.format("%Y%m%d_%H%M%S")
    )
}

fn build_filter(default_level: &str) -> Result<EnvFilter, LoggerError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_level).map_err(|e| LoggerError::InvalidFilter {
        filter: default_level.to_string(),
        reason: e.to_string(),
    })
}

fn open_log_file(dir: &Path, app_name: &str) -> Result<(PathBuf, File), LoggerError> {
    fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(log_file_name(app_name, Local::now()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggerError::OpenFile {
            path: path.clone(),
            source,
        })?;

    Ok((path, file))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be opened,
/// or a global subscriber has already been installed.
pub fn setup_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = build_filter(&config.default_level)?;

    let (log_path, file_layer) = match &config.log_dir {
        Some(dir) => {
            let (path, file) = open_log_file(dir, &config.app_name)?;
            let layer = fmt::layer()
                .with_timer(ClockTime)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(path), Some(layer))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer().with_timer(ClockTime).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    match log_path {
        Some(path) => tracing::debug!(
            "Logger for '{}' initialized (file: {})",
            config.app_name,
            path.display()
        ),
        None => tracing::debug!("Logger for '{}' initialized", config.app_name),
    }

    Ok(())
}
