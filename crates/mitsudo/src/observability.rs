//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr. When a log file or directory is
//! configured, JSON lines are also written there through a non-blocking
//! appender.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "MITSUDO_LOG_PATH";
const LOG_DIR_ENV: &str = "MITSUDO_LOG_DIR";
const LOG_FILE_NAME: &str = "mitsudo.log";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file. Takes precedence over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rolled log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `MITSUDO_LOG_PATH` / `MITSUDO_LOG_DIR`, falling back to the
    /// configured directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            non_empty_env(LOG_PATH_ENV),
            non_empty_env(LOG_DIR_ENV),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path,
            log_dir: env_dir.or(config_dir),
        }
    }

    fn is_enabled(&self) -> bool {
        self.log_path.is_some() || self.log_dir.is_some()
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, each `-v`
/// raises the level one step, and the configured level is the fallback.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, default_level))
}

fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Keeps the file appender flushing until dropped.
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Hold the returned guard for the life of the process; dropping it flushes
/// and stops the file writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, file_guard) = if config.is_enabled() {
        let appender = file_appender(config)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: file_guard })
}

fn file_appender(
    config: &ObservabilityConfig,
) -> anyhow::Result<tracing_appender::rolling::RollingFileAppender> {
    if let Some(ref path) = config.log_path {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let file_name = path
            .file_name()
            .with_context(|| format!("log path has no file name: {}", path.display()))?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        return Ok(tracing_appender::rolling::never(dir, file_name));
    }

    let dir = config
        .log_dir
        .as_ref()
        .context("no log destination configured")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(tracing_appender::rolling::daily(dir, LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_path_and_dir_take_precedence() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.log")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/a.log")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/env")));
    }

    #[test]
    fn config_dir_is_the_fallback() {
        let config = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/tmp/config")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/config")));
        assert!(config.is_enabled());
    }

    #[test]
    fn nothing_configured_disables_file_logging() {
        assert!(!ObservabilityConfig::resolve(None, None, None).is_enabled());
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_directive(true, 3, "info"), "error");
    }

    #[test]
    fn verbosity_steps_up() {
        assert_eq!(level_directive(false, 0, "warn"), "warn");
        assert_eq!(level_directive(false, 1, "warn"), "debug");
        assert_eq!(level_directive(false, 2, "warn"), "trace");
    }
}
