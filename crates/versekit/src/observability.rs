//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log file or directory is
//! configured, events are also written as JSON lines through a non-blocking
//! writer. Keep the returned [`ObservabilityGuard`] alive until exit so
//! buffered lines are flushed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "VERSEKIT_LOG_PATH";
/// Log directory (daily rolling files).
const LOG_DIR_ENV: &str = "VERSEKIT_LOG_DIR";
/// File name prefix for rolling logs.
const LOG_FILE_PREFIX: &str = "versekit.jsonl";

/// Where JSON log lines are written, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Single log file; wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the log environment variables, falling back to the configured
    /// log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path.filter(|p| !p.as_os_str().is_empty()),
            log_dir: env_dir
                .filter(|p| !p.as_os_str().is_empty())
                .or(config_log_dir),
        }
    }

    /// Whether any file output is configured.
    pub const fn writes_file(&self) -> bool {
        self.log_path.is_some() || self.log_dir.is_some()
    }

    fn appender(&self) -> anyhow::Result<Option<rolling::RollingFileAppender>> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            create_dir(dir)?;
            return Ok(Some(rolling::never(dir, file_name)));
        }
        if let Some(ref dir) = self.log_dir {
            create_dir(dir)?;
            return Ok(Some(rolling::daily(dir, LOG_FILE_PREFIX)));
        }
        Ok(None)
    }
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, `-v`
/// debug, `-vv` trace, and no flag the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_level(quiet, verbose, default_level))
}

fn filter_level(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Keeps the background log writer alive.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_guard) = match cfg.appender()? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: file_guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(filter_level(true, 2, "info"), "error");
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(filter_level(false, 0, "warn"), "warn");
        assert_eq!(filter_level(false, 1, "warn"), "debug");
        assert_eq!(filter_level(false, 3, "warn"), "trace");
    }

    #[test]
    fn env_dir_overrides_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/var/log/versekit")),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/var/log/versekit")));
        assert!(cfg.writes_file());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::new()),
            Some(PathBuf::new()),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert!(cfg.log_path.is_none());
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn no_file_output_by_default() {
        let cfg = ObservabilityConfig::resolve(None, None, None);
        assert!(!cfg.writes_file());
        assert!(cfg.appender().unwrap().is_none());
    }

    #[test]
    fn log_path_appender_creates_parent_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("run.jsonl");
        let cfg = ObservabilityConfig::resolve(Some(path), None, None);
        assert!(cfg.appender().unwrap().is_some());
        assert!(tmp.path().join("nested").is_dir());
    }
}
