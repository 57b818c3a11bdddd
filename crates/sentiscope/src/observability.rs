//! Logging and tracing initialization.
//!
//! Logs go to stderr by default. When a log directory is configured, a
//! daily-rolling JSONL file is written instead, with a non-blocking
//! writer whose guard must be held for the lifetime of the process.

use camino::Utf8Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking log writer alive. Drop flushes pending output.
pub struct ObservabilityGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Build the env filter from CLI flags and the configured log level.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` forces errors only and
/// each `-v` raises verbosity past the config level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global tracing subscriber.
pub fn init_observability(
    log_dir: Option<&Utf8Path>,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::daily(dir.as_std_path(), "sentiscope.jsonl");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;
        Ok(ObservabilityGuard {
            _file_guard: Some(guard),
        })
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;
        Ok(ObservabilityGuard { _file_guard: None })
    }
}
