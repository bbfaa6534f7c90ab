use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use strata_fetch::{DEFAULT_BASE_URL, FetchOptions, RetryPolicy};
use strata_fs::{DEFAULT_DATA_DIR, StoreOptions};

use crate::logging::LogConfig;
use crate::pipeline::DEFAULT_ENDPOINTS;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "strata",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapshot JSON collections from an HTTP service into timestamped files",
    long_about = None,
    propagate_version = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// Arguments for `run` when no subcommand is given; ignored otherwise.
    #[command(flatten)]
    pub run: RunArg,

    /// Directory snapshots are written to and read from.
    #[arg(long, global = true, env = "STRATA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Log file, appended to alongside stdout.
    #[arg(long, global = true, env = "STRATA_LOG_FILE", default_value = "pipeline.log")]
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, env = "STRATA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch every endpoint and save a snapshot of each.
    #[command(name = "run")]
    Run(RunArg),
    /// Print the newest snapshot path for an endpoint.
    #[command(alias = "l", name = "latest")]
    Latest(LatestArg),
}

#[derive(Clone, Debug, Args)]
pub struct RunArg {
    /// Address endpoint names are appended to.
    #[arg(long, env = "STRATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Endpoint to snapshot; repeat or comma-separate for several.
    #[arg(
        short,
        long = "endpoint",
        env = "STRATA_ENDPOINTS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ENDPOINTS.map(String::from)
    )]
    pub endpoints: Vec<String>,

    /// Attempts per request, the first one included.
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    /// Base retry delay in milliseconds; doubles on each retry.
    #[arg(long, default_value_t = 1000)]
    pub backoff_ms: u64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// fsync each snapshot before it becomes visible.
    #[arg(long)]
    pub sync: bool,
}

#[derive(Clone, Debug, Args)]
pub struct LatestArg {
    /// Endpoint name the snapshots were saved under.
    pub name: String,
}

impl App {
    /// The subcommand to execute; bare `strata` means `run`.
    pub fn command(&self) -> Commands {
        self.cmd
            .clone()
            .unwrap_or_else(|| Commands::Run(self.run.clone()))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            file:  Some(self.log_file.clone()),
        }
    }
}

impl RunArg {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .retry(
                RetryPolicy::default()
                    .max_attempts(self.max_attempts)
                    .backoff(Duration::from_millis(self.backoff_ms)),
            )
    }

    pub fn store_options(&self) -> StoreOptions { StoreOptions::new().sync(self.sync) }
}
