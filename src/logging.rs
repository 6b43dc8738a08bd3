//! Logging setup for the `rollcall-qr` binary
//!
//! Terminal logs go to stderr so stdout carries nothing but the generated
//! link. A plain-text copy can be teed to a file, optionally rotated.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

// Keeps the file writer's background thread alive for the process lifetime.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber described by `options`.
///
/// `ROLLCALL_LOG_LEVEL` wins over `options.level`. A no-op when a subscriber
/// is already installed.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let level = std::env::var("ROLLCALL_LOG_LEVEL").unwrap_or_else(|_| options.level.clone());
    let filter = EnvFilter::try_new(level.as_str())
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))?;

    let file_layer = options
        .file
        .as_deref()
        .map(|path| file_writer(path, options.rotation))
        .transpose()?
        .map(|writer| {
            fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(writer)
        });

    let stderr_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(options.color)
        .with_writer(io::stderr);

    Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Open the non-blocking writer for `path`, creating its directory.
fn file_writer(path: &Path, rotation: Option<LogRotation>) -> Result<NonBlocking> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let builder = NonBlockingBuilder::default().lossy(false);
    let (writer, guard) = match rotation {
        Some(rotation) => {
            let file_name = path.file_name().ok_or_else(|| {
                Error::Config(format!(
                    "Log file path '{}' needs a file name for rotation",
                    path.display()
                ))
            })?;
            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, file_name),
                LogRotation::Daily => rolling::daily(dir, file_name),
            };
            builder.finish(appender)
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            builder.finish(file)
        }
    };

    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        let options = LoggingOptions {
            level: "rollcall_qr=notalevel".to_string(),
            ..LoggingOptions::default()
        };
        if !tracing::dispatcher::has_been_set() && std::env::var("ROLLCALL_LOG_LEVEL").is_err() {
            assert!(matches!(init(&options), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_file_writer_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("rollcall.log");

        file_writer(&path, None).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_rotated_writer_needs_file_name() {
        let err = file_writer(Path::new("/"), Some(LogRotation::Daily)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
