//! JSON file key-value store.
//!
//! All entries live in a single human-readable JSON file. Every `set` rewrites
//! the file through a temporary file and a rename so that a crash never leaves
//! a half-written store behind.

use crate::domain::error::{MealdeckError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// On-disk container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the file format for future migrations.
    version: u32,

    /// Opaque string values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file store.
///
/// The whole file is loaded on open and kept in memory. Reads never touch the
/// disk again.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "favorites": "[\"52772\",\"52959\"]",
///     "theme": "dark"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
    /// Set when the last write failed and memory is ahead of disk.
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file starts empty. A file that cannot be read or parsed is
    /// logged and also starts empty; it is overwritten on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mealdeck::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/mealdeck/store.json"))?;
    /// # Ok::<(), mealdeck::MealdeckError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        let _span = tracing::debug_span!("json_store_open", path = ?file_path).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "store file unreadable, starting empty");
                StoreData::default()
            })
        } else {
            tracing::debug!("no store file yet");
            StoreData::default()
        };

        tracing::debug!(entries = data.entries.len(), "store opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| MealdeckError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != FORMAT_VERSION {
            tracing::debug!(version = data.version, "unexpected store version, reading anyway");
        }

        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| MealdeckError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("retrying failed write on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
