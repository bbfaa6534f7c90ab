//! Snapshot persistence.
//!
//! A [`SnapshotStore`] turns an in-memory JSON value into a file named
//! `<name>_<YYYYMMDD_HHMMSS>.json` under its root directory. Serialization is
//! checked before the filesystem is touched, and a write never replaces an
//! existing file.

mod error;
mod name;
mod store;

pub use error::{Result, StoreError};
pub use name::{TIMESTAMP_FORMAT, parse_snapshot_file_name, snapshot_file_name};
pub use store::{DEFAULT_DATA_DIR, SnapshotStore, StoreOptions};
