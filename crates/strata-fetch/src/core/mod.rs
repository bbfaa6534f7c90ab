//! Pure transformations for fetching.
//!
//! Nothing in here performs I/O; the effectful side lives in `effects`.

mod retry;
mod validation;

pub use retry::retry_delay;
pub use validation::{endpoint_url, is_retryable_status, is_success, json_kind};
