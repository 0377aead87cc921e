//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr. When a log location is available, JSONL
//! logs are also written to a daily-rotated file through a non-blocking
//! writer whose guard must live until the process exits.
//!
//! Log file location, highest precedence first:
//! 1. `READSCORE_LOG_PATH` (exact file, no rotation)
//! 2. `READSCORE_LOG_DIR`
//! 3. `log_dir` from config
//! 4. `<platform data dir>/logs`

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "READSCORE_LOG_PATH";
const LOG_DIR_ENV: &str = "READSCORE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "readscore";

/// Where file logs are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file, set from `READSCORE_LOG_PATH`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve log locations from the environment, then `config_log_dir`,
    /// then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let env_path = |name: &str| {
            std::env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self {
            log_path: env_path(LOG_PATH_ENV),
            log_dir: env_path(LOG_DIR_ENV)
                .or(config_log_dir)
                .or_else(default_log_dir),
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "readscore")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Build the global filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, `-v` debug,
/// `-vv` trace, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, log_level: &str) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => log_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// The most detailed level shown on stderr.
///
/// Without `-v` only warnings reach the terminal so command output stays clean.
pub const fn console_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// Returns the file writer guard, if file logging is active.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    console: LevelFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console);

    let (file_layer, guard) = match file_appender(config) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if guard.is_none() {
        tracing::debug!("file logging disabled: no writable log location");
    }
    Ok(guard)
}

/// Open the rolling appender, or `None` when no location is usable.
fn file_appender(config: &ObservabilityConfig) -> Option<RollingFileAppender> {
    if let Some(ref path) = config.log_path {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file = path.file_name()?.to_str()?;
        std::fs::create_dir_all(dir).ok()?;
        return RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file)
            .build(dir)
            .ok();
    }
    let dir = config.log_dir.as_deref()?;
    std::fs::create_dir_all(dir).ok()?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("jsonl")
        .build(dir)
        .ok()
}
