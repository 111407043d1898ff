//! Tracing subscriber setup for the command-line front end

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LOG_ENV_VAR, LogConfig, LogFormat, log_path};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Filter from `VERSION_GATE_LOG` if set, else the configured level
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered records on drop; keep it alive for the
/// lifetime of the program.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard, LoggingError> {
    let (writer, guard) = if config.to_file {
        let path = log_path();
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| ".".into());
        std::fs::create_dir_all(&dir)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "version-gate.log".into());
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    let layer = fmt::layer().with_writer(writer).with_target(true);
    let registry = tracing_subscriber::registry().with(build_filter(config));

    match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init()?,
        LogFormat::Text => registry.with(layer.with_ansi(!config.to_file)).try_init()?,
    }

    Ok(guard)
}
