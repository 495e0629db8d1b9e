//! Key-value store persisted as a single JSON document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use notifeed_core::error::{AppError, ErrorKind};
use notifeed_core::result::AppResult;
use notifeed_core::traits::store::KeyValueStore;

/// A key-value store backed by one JSON object on disk.
///
/// Every call reads the document, and every mutation merges its single key
/// into a fresh read before rewriting the file (temp file + rename). Other
/// processes sharing the file therefore see each other's keys; two writes
/// landing in the same read-modify-write window still resolve
/// last-writer-wins.
#[derive(Debug)]
pub struct FileStore {
    /// Document path.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file starts empty. A malformed file also reads as empty
    /// and is overwritten by the next write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };
        let entries = store.read_document()?;
        debug!(path = %store.path.display(), keys = entries.len(), "Opened file store");
        Ok(store)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> AppResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => Ok(map),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Store file is malformed, reading as empty");
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read store file '{}'", self.path.display()),
                e,
            )),
        }
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self
            .path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.guard();
        let mut entries = self.read_document()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.guard();
        let mut entries = self.read_document()?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let _guard = self.guard();
        Ok(self.read_document()?.into_keys().collect())
    }
}
