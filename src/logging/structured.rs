//! Subscriber setup for the `meridian` binary
//!
//! Human-readable events go to stderr so stdout stays free for the JSON that
//! commands print. With `logging.local_enabled`, the same events are also
//! written as JSON lines to `<local_path>/meridian.log.<period>`.

use crate::config::LoggingConfig;
use crate::domain::{MeridianError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of the rolling log
const LOG_FILE_PREFIX: &str = "meridian.log";

/// Flushes the file writer when dropped; hold it until `main` returns
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `RUST_LOG` replaces the derived filter when set. Without it, `meridian`
/// logs at `log_level` and its dependencies only report warnings.
///
/// # Errors
///
/// Fails on an unknown level, an uncreatable log directory, or when a
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use meridian::logging::init_logging;
/// use meridian::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed();

    let (file, file_guard) = if config.local_enabled {
        let (writer, guard) = open_log_file(config)?;
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .with_filter(filter)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| MeridianError::Other(format!("Logging already initialized: {e}")))?;

    if config.local_enabled && config.local_rotation == "size" {
        tracing::warn!(
            max_size_mb = config.local_max_size_mb,
            "Size-based log rotation is not available; rotating daily"
        );
    }
    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn parse_log_level(value: &str) -> Result<Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(MeridianError::Configuration(format!(
            "Invalid log level '{value}'. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}

/// Filter used when `RUST_LOG` is unset
fn default_directives(level: Level) -> String {
    format!("warn,meridian={}", level.as_str().to_ascii_lowercase())
}

fn rotation_for(config: &LoggingConfig) -> Rotation {
    match config.local_rotation.as_str() {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = Path::new(&config.local_path);
    std::fs::create_dir_all(dir).map_err(|e| {
        MeridianError::Configuration(format!(
            "Cannot create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let appender = RollingFileAppender::new(rotation_for(config), dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn file_config(path: &Path, rotation: &str) -> LoggingConfig {
        LoggingConfig {
            local_enabled: true,
            local_path: path.display().to_string(),
            local_rotation: rotation.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test_case("trace", Level::TRACE ; "trace")]
    #[test_case("Debug", Level::DEBUG ; "mixed case")]
    #[test_case(" info ", Level::INFO ; "padded")]
    #[test_case("WARN", Level::WARN ; "upper case")]
    #[test_case("error", Level::ERROR ; "error")]
    fn test_parse_log_level(value: &str, expected: Level) {
        assert_eq!(parse_log_level(value).unwrap(), expected);
    }

    #[test_case("verbose" ; "unknown word")]
    #[test_case("" ; "empty")]
    #[test_case("3" ; "numeric")]
    fn test_parse_log_level_rejects(value: &str) {
        let err = parse_log_level(value).unwrap_err();
        assert!(matches!(err, MeridianError::Configuration(_)));
    }

    #[test]
    fn test_default_directives_quiet_dependencies() {
        assert_eq!(default_directives(Level::DEBUG), "warn,meridian=debug");
        assert!(default_directives(Level::DEBUG).parse::<EnvFilter>().is_ok());
    }

    #[test_case("hourly", Rotation::HOURLY ; "hourly")]
    #[test_case("daily", Rotation::DAILY ; "daily")]
    #[test_case("size", Rotation::DAILY ; "size falls back to daily")]
    fn test_rotation_for(rotation: &str, expected: Rotation) {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(rotation_for(&file_config(dir.path(), rotation)), expected);
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("refresh");

        let (_writer, guard) = open_log_file(&file_config(&nested, "daily")).unwrap();
        drop(guard);

        assert!(nested.is_dir());
    }

    #[test]
    fn test_open_log_file_under_a_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = open_log_file(&file_config(&blocker.join("logs"), "daily")).unwrap_err();
        assert!(matches!(err, MeridianError::Configuration(_)));
        assert!(err.to_string().contains("Cannot create log directory"));
    }
}
