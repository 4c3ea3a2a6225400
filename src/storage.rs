use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write store file: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat string key-value persistence. Writes are synchronous and durable
/// once `set` returns.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or unreadable file yields an
    /// empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// The in-memory copy only changes once the file write succeeded.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        let payload = serde_json::to_vec_pretty(&next)?;
        std::fs::write(&self.path, payload)?;
        self.entries = next;
        Ok(())
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse store file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read store file: {err}");
            BTreeMap::new()
        }
    }
}
