use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StorageError;

/// Keyed byte storage behind every persisted list and preference.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns `Ok(None)` when nothing was ever stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces whatever is stored under `key`.
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Second copy to try when the primary value fails to parse.
    async fn load_backup(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(None)
    }
}

/// Reads a JSON value, falling back to the backup copy and then to `T::default()`.
///
/// Never fails: missing or corrupt data is logged and treated as empty.
pub async fn read_json<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage + ?Sized,
{
    let bytes = match storage.load(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(error = %e, key, "failed to read stored value");
            return T::default();
        }
    };

    match serde_json::from_slice::<T>(&bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, key, "failed to parse stored value, trying backup");
            match storage.load_backup(key).await {
                Ok(Some(backup)) => serde_json::from_slice::<T>(&backup).unwrap_or_else(|e| {
                    warn!(error = %e, key, "failed to parse backup value");
                    T::default()
                }),
                _ => T::default(),
            }
        }
    }
}

pub async fn write_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value)?;
    storage.save(key, bytes).await
}

/// Process-local storage, used by tests and as a last resort when no
/// directory can be found.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    writable: Arc<AtomicBool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            writable: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulates a full or revoked quota: every later `save` fails.
    pub fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::SeqCst);
    }

    pub async fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.inner.write().await.insert(key.to_owned(), bytes.into());
    }

    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.read().await.get(key).cloned()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        if !self.writable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("quota exceeded for {key}")));
        }
        self.inner.write().await.insert(key.to_owned(), bytes);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed over `<key>.json`, so a
/// crash mid-write leaves either the old file or a readable temp copy.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Self::read_optional(&self.path_for(key)).await
    }

    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "persisted");
        Ok(())
    }

    async fn load_backup(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Self::read_optional(&self.path_for(key).with_extension("json.tmp")).await
    }
}
