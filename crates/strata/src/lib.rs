//! Fetch-then-save orchestration, command line and logging setup.

pub mod cli;
pub mod logging;
pub mod pipeline;

pub use pipeline::{DEFAULT_ENDPOINTS, Pipeline, PipelineError, SavedSnapshot};
