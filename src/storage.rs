use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use thiserror::Error;

// 1. KeyValueStore Contract
/// KeyValueStore
///
/// Defines the abstract contract for the persistence layer the session
/// provider writes through to. This trait allows us to swap the concrete
/// implementation—from the durable file-backed store (JsonFileStore) in a
/// real shell to the in-memory store (MemoryStore) during testing—without
/// affecting the session provider.
///
/// Reads are deliberately infallible: a value that cannot be produced is
/// simply absent, which the caller must treat as "no data" (fail safe).
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when the key is absent
    /// or the backing medium cannot produce it.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any previous value. The write
    /// is synchronous: when this returns `Ok`, a concurrent reader of the
    /// same store observes the new value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key` if present. Removal of an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// StorageState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type StorageState = Arc<dyn KeyValueStore>;

/// StorageError
///
/// Failures raised by a store's write path. Read failures never surface as
/// errors; they degrade to `None`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("simulated storage failure")]
    Simulated,
}

// 2. The Real Implementation (JSON file)
/// JsonFileStore
///
/// The durable implementation: a single JSON object on disk mapping keys to
/// string values, loaded once at construction and rewritten in full on every
/// mutation. This is what gives sessions their survive-a-restart behavior.
///
/// An unreadable or corrupt file is treated as an empty store (logged at
/// WARN), never as a startup failure: losing a stale session is acceptable,
/// refusing to start is not.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// open
    ///
    /// Loads the store from `path`. A missing file yields an empty store; a
    /// present-but-corrupt file also yields an empty store and a warning.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("discarding corrupt store file {:?}: {}", path, e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Serializes the full entry map and rewrites the backing file.
    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().expect("store lock poisoned");
        if entries.remove(key).is_some() {
            if let Err(e) = self.flush(&entries) {
                tracing::error!("failed to persist removal of {}: {}", key, e);
            }
        }
    }
}

// 3. The In-Memory Implementation (For Unit Tests & Previews)
/// MemoryStore
///
/// An in-memory implementation of `KeyValueStore` used for tests and
/// ephemeral preview shells. Supports a failure mode so callers can exercise
/// their degraded-storage paths without a real broken disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    /// When true, every write returns a simulated failure.
    pub should_fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            should_fail: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Simulated);
        }
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .expect("store lock poisoned")
            .remove(key);
    }
}
