//! Persistent key-value storage
//!
//! A small string-keyed, string-valued store with a file-backed
//! implementation in the XDG data directory (~/.local/share/ip-tracker/)
//! and an in-memory one. Components never touch the store directly; they go
//! through [`Settings`].

pub mod settings;

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::storage::STORE_FILE_NAME;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use settings::Settings;

/// Trait for string key-value stores
pub trait KvStore: Send + Sync {
    /// Read a value, or None if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// File-backed store
///
/// The whole store is one JSON object. Every operation re-reads the file, so
/// a CLI and a running server see each other's writes; there is no locking
/// and concurrent writers can lose updates.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Store("Could not determine data directory".to_string()))
    }

    /// Get the store file path
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(STORE_FILE_NAME))
    }

    /// Open the store at the default path
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::store_path()?))
    }

    /// Open the store at a specific path; the file is created on first write
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::Store(format!("Failed to read store file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Store(format!("Failed to parse store file: {}", e)))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create data directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(values)
            .map_err(|e| Error::Store(format!("Failed to serialize store: {}", e)))?;

        fs::write(&self.path, content)
            .map_err(|e| Error::Store(format!("Failed to write store file: {}", e)))?;

        debug!(path = %self.path.display(), keys = values.len(), "store written");
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}
