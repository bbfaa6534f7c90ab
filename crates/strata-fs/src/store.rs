use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::error::{Result, StoreError};
use crate::name::{TIMESTAMP_FORMAT, parse_snapshot_file_name, snapshot_file_name};

/// Directory snapshots go to when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Upper bound on `_<seq>` suffixes tried for one name and second.
const MAX_SEQ: u32 = 1024;

#[derive(Clone, Copy, Debug)]
pub struct StoreOptions {
    /// fsync the file before it is moved into place.
    pub sync:   bool,
    /// Spaces per indentation level in the written JSON.
    pub indent: usize,
}

impl Default for StoreOptions {
    fn default() -> Self { Self::new() }
}

impl StoreOptions {
    pub fn new() -> Self {
        Self {
            sync:   false,
            indent: 4,
        }
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Writes and reads timestamped JSON snapshots under one root directory.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    root:    PathBuf,
    options: StoreOptions,
}

impl Default for SnapshotStore {
    fn default() -> Self { Self::new(DEFAULT_DATA_DIR) }
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:    root.into(),
            options: StoreOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn options(&self) -> StoreOptions { self.options }

    /// Persist `payload` as `<root>/<name>_<now>.json` and return that path.
    ///
    /// The payload is serialized before anything touches the disk, so a
    /// serialization failure leaves no directory and no file behind.
    pub fn save<T: Serialize + ?Sized>(&self, payload: &T, name: &str) -> Result<PathBuf> {
        self.save_at(payload, name, Local::now().naive_local())
    }

    /// Like [`save`](Self::save) with an explicit timestamp.
    pub fn save_at<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        name: &str,
        at: NaiveDateTime,
    ) -> Result<PathBuf> {
        match self.try_save(payload, name, at) {
            Ok((path, bytes)) => {
                info!(name, bytes, path = %path.display(), "saved {name} to {}", path.display());
                Ok(path)
            }
            Err(e) => {
                error!(name, error = %e, "failed to save {name}");
                Err(e)
            }
        }
    }

    fn try_save<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        name: &str,
        at: NaiveDateTime,
    ) -> Result<(PathBuf, u64)> {
        let content = to_pretty_json(payload, self.options.indent).map_err(StoreError::Serialize)?;

        fs::create_dir_all(&self.root).map_err(|e| StoreError::CreateDir {
            path:   self.root.clone(),
            source: e,
        })?;

        let path = self.write_new(name, at, &content)?;
        Ok((path, content.len() as u64))
    }

    /// Stage `content` in a temp file inside the root, then link it to the
    /// first free snapshot name. Existing files are never replaced.
    fn write_new(&self, name: &str, at: NaiveDateTime, content: &[u8]) -> Result<PathBuf> {
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| StoreError::Write { path, source }
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".").suffix(".tmp");
        // Same mode a plain create gets (0666 minus umask), not tempfile's 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut staged = builder
            .tempfile_in(&self.root)
            .map_err(write_err(&self.root))?;

        staged.write_all(content).map_err(write_err(staged.path()))?;
        if self.options.sync {
            staged.as_file().sync_all().map_err(write_err(staged.path()))?;
        }

        for seq in 0..MAX_SEQ {
            let path = self.root.join(snapshot_file_name(name, at, seq));
            staged = match persist_new(staged, &path) {
                Ok(()) => return Ok(path),
                Err(Persist::Taken(file)) => file,
                Err(Persist::Failed(source)) => return Err(StoreError::Write { path, source }),
            };
        }

        Err(StoreError::NameExhausted {
            name:      name.to_string(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Read a snapshot back as JSON.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| StoreError::Read {
            path:   path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Parse {
            path:   path.to_path_buf(),
            source: e,
        })
    }

    /// Every snapshot for `name`, oldest first. A missing root means none.
    pub fn list(&self, name: &str) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path:   self.root.clone(),
                    source: e,
                });
            }
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Read {
                path:   self.root.clone(),
                source: e,
            })?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else { continue };
            if let Some(key) = parse_snapshot_file_name(name, file_name) {
                found.push((key, entry.path()));
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    /// The newest snapshot for `name`, if any.
    pub fn latest(&self, name: &str) -> Result<Option<PathBuf>> {
        Ok(self.list(name)?.pop())
    }
}

enum Persist {
    Taken(NamedTempFile),
    Failed(io::Error),
}

fn persist_new(staged: NamedTempFile, path: &Path) -> std::result::Result<(), Persist> {
    match staged.persist_noclobber(path) {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Err(Persist::Taken(e.file)),
        Err(e) => Err(Persist::Failed(e.error)),
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(
    payload: &T,
    indent: usize,
) -> std::result::Result<Vec<u8>, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    payload.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let out = to_pretty_json(&json!({"id": 1}), 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n    \"id\": 1\n}");
    }

    #[test]
    fn test_pretty_json_custom_indent() {
        let out = to_pretty_json(&json!([1]), 2).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n  1\n]");
    }

    #[test]
    fn test_pretty_json_rejects_non_string_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(to_pretty_json(&map, 4).is_err());
    }

    #[test]
    fn test_default_options() {
        let options = StoreOptions::default();
        assert!(!options.sync);
        assert_eq!(options.indent, 4);
        assert_eq!(SnapshotStore::default().root(), Path::new("data"));
    }
}
