use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error("no free file name for {name} at {timestamp}")]
    NameExhausted { name: String, timestamp: String },
}

impl StoreError {
    /// Whether the failure happened on the filesystem rather than in serde.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StoreError::CreateDir { .. } | StoreError::Write { .. } | StoreError::Read { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
