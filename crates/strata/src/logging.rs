use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where and how much to log.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset, e.g. `info` or `strata_fetch=debug`.
    pub level: String,
    /// File appended to alongside stdout. `None` logs to stdout only.
    pub file:  Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file:  Some(PathBuf::from("pipeline.log")),
        }
    }
}

/// Install the process-wide subscriber. Call once at startup.
///
/// Both sinks get timestamp, level and message; the file copy has no ANSI
/// colouring.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log filter {:?}", config.level))?,
    };

    let stdout_layer = fmt::layer().with_target(false).with_writer(io::stdout);

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}
