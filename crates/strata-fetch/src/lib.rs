//! JSON collection fetching with a uniform retry policy.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations with trait abstraction
//!
//! A [`Fetcher`] owns a single [`HttpClient`] and applies the same
//! [`RetryPolicy`] to every request it issues. Successful responses are
//! decoded into a [`Payload`], which is always a JSON array or object.

pub mod core;
pub mod data;
mod effects;
mod error;

pub use crate::core::{endpoint_url, is_retryable_status, is_success, json_kind, retry_delay};
pub use data::{DEFAULT_BASE_URL, FetchOptions, Payload, RetryPolicy};
pub use effects::{Fetcher, HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
