//! Opaque async key-value storage for user preferences.
//!
//! Values are plain strings; callers decide the encoding per key. The file
//! implementation keeps one file per key so a torn write of one preference
//! can never corrupt another.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;

/// Storage key for the last searched city (raw string value).
pub const LAST_CITY_KEY: &str = "lastCity";

/// Storage key for the dark-mode flag (JSON-encoded boolean).
pub const DARK_MODE_KEY: &str = "darkMode";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. A key that has never been written is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising the fail-soft path.
    pub fn failing() -> Self {
        Self {
            values: Mutex::default(),
            fail_writes: true,
        }
    }

    /// Pre-populate a key, as if a previous run had persisted it.
    pub fn seed(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .values
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?
            .get(key)
            .cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(std::io::Error::other("write refused").into());
        }
        self.values
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
