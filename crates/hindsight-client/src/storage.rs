//! Persistent key/value storage for the session.
//!
//! Plays the role browser local storage plays for a web client: the auth
//! client keeps the bearer token under `token` and the serialized user under
//! `user`. [`FileStore`] persists to a JSON file readable only by the owner,
//! [`MemoryStore`] is process-local.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// String key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}

/// JSON file backed store (`<data_dir>/session.json`).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn read_map(&self) -> ClientResult<BTreeMap<String, String>> {
        match self.read_raw()? {
            Some(content) => serde_json::from_str(&content).map_err(|e| {
                ClientError::storage(format!("corrupt session file {}: {e}", self.path.display()))
            }),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Map to update on a write. A corrupt file is discarded so a new session
    /// can replace it; the flag reports that it must be rewritten.
    fn read_map_for_write(&self) -> ClientResult<(BTreeMap<String, String>, bool)> {
        let Some(content) = self.read_raw()? else {
            return Ok((BTreeMap::new(), false));
        };
        match serde_json::from_str(&content) {
            Ok(map) => Ok((map, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt session file");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Create the data directory (0700) when missing. An existing directory
    /// keeps its permissions.
    fn ensure_dir(&self) -> ClientResult<()> {
        let dir = self.dir();
        if dir.is_dir() {
            return Ok(());
        }
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder
            .create(dir)
            .map_err(|e| ClientError::storage(format!("mkdir {}: {e}", dir.display())))
    }

    /// Replace the file atomically. The temp file is created 0600, so the
    /// token is never readable by others, and an interrupted write leaves
    /// the previous file intact.
    fn write_map(&self, map: &BTreeMap<String, String>) -> ClientResult<()> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ClientError::storage(format!(
                    "delete {}: {e}",
                    self.path.display()
                ))),
            };
        }

        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(map)?;
        let dir = self.dir();

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| ClientError::storage(format!("create in {}: {e}", dir.display())))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| ClientError::storage(format!("write {}: {e}", self.path.display())))?;
        tmp.persist(&self.path).map_err(|e| {
            ClientError::storage(format!("replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }

    fn guard(&self) -> ClientResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| ClientError::storage("session store lock poisoned"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.guard()?;
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let _guard = self.guard()?;
        let (mut map, corrupt) = self.read_map_for_write()?;
        if map.remove(key).is_some() || corrupt {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| ClientError::storage("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.items()?.remove(key);
        Ok(())
    }
}
