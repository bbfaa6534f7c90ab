use std::path::PathBuf;

use strata_fetch::{FetchError, Fetcher, HttpClient};
use strata_fs::{SnapshotStore, StoreError};
use tracing::info;

/// Endpoints snapshotted when none are configured, in order.
pub const DEFAULT_ENDPOINTS: [&str; 3] = ["tracks", "users", "listen_history"];

/// One endpoint's snapshot, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub endpoint: String,
    pub path:     PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetching {endpoint} failed: {source}")]
    Fetch {
        endpoint: String,
        source:   FetchError,
    },

    #[error("saving {endpoint} failed: {source}")]
    Store {
        endpoint: String,
        source:   StoreError,
    },
}

impl PipelineError {
    pub fn endpoint(&self) -> &str {
        match self {
            PipelineError::Fetch { endpoint, .. } | PipelineError::Store { endpoint, .. } => endpoint,
        }
    }
}

/// Fetches each configured endpoint and saves it, one after another.
pub struct Pipeline<C: HttpClient> {
    fetcher:   Fetcher<C>,
    store:     SnapshotStore,
    endpoints: Vec<String>,
}

impl<C: HttpClient> Pipeline<C> {
    pub fn new(fetcher: Fetcher<C>, store: SnapshotStore) -> Self {
        Self {
            fetcher,
            store,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    pub fn fetcher(&self) -> &Fetcher<C> { &self.fetcher }

    pub fn store(&self) -> &SnapshotStore { &self.store }

    /// Snapshot every endpoint in order.
    ///
    /// Stops at the first failure. Snapshots already written stay on disk.
    pub fn run(&self) -> Result<Vec<SavedSnapshot>, PipelineError> {
        info!(
            endpoints = self.endpoints.len(),
            base_url = %self.fetcher.options().base_url,
            data_dir = %self.store.root().display(),
            "starting snapshot run"
        );

        let mut saved = Vec::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            let path = self.snapshot(endpoint)?;
            saved.push(SavedSnapshot {
                endpoint: endpoint.clone(),
                path,
            });
        }

        info!(snapshots = saved.len(), "snapshot run complete");
        Ok(saved)
    }

    /// Fetch and save a single endpoint.
    pub fn snapshot(&self, endpoint: &str) -> Result<PathBuf, PipelineError> {
        let payload = self.fetcher.fetch(endpoint).map_err(|source| PipelineError::Fetch {
            endpoint: endpoint.to_string(),
            source,
        })?;

        self.store
            .save(&payload, endpoint)
            .map_err(|source| PipelineError::Store {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}
