// tiledash-cli/src/logging.rs
use std::fs;
use tiledash_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialise file logging. `RUST_LOG` overrides the configured level.
///
/// The terminal belongs to the UI, so output goes to the log file only.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let path = config.resolved_file()?;
    let dir = path
        .parent()
        .ok_or_else(|| format!("log file '{}' has no parent directory", path.display()))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("log file '{}' has no file name", path.display()))?;
    fs::create_dir_all(dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
