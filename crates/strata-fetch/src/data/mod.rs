//! Immutable data types for fetching.
//!
//! Configuration, the retry policy and the validated payload live here. These
//! types are built once and passed around by reference.

pub mod options;
pub mod payload;

pub use options::{DEFAULT_BASE_URL, FetchOptions, RetryPolicy};
pub use payload::Payload;
