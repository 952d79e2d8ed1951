//! File-backed local key/value storage.
//!
//! `LocalStore` holds a flat map of string keys to JSON values inside
//! a single file:
//!
//! ```text
//! { "version": 1, "created_at": "...", "entries": { "<key>": <value>, ... } }
//! ```
//!
//! A missing file yields an empty store; a file that exists but cannot
//! be parsed is an error.  Saves go through a temp file + rename in the
//! same directory, so readers never observe a half-written file.  The
//! store serializes individual reads and writes but makes no atomicity
//! guarantee across a read-modify-write sequence — concurrent writers
//! interleave, last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{GlossaError, Result};

/// Current store file format version.
const CURRENT_VERSION: u8 = 1;

/// On-disk envelope around the entry map.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u8,
    created_at: DateTime<Utc>,
    entries: BTreeMap<String, Value>,
}

/// A flat key/value store persisted as a single JSON file.
pub struct LocalStore {
    path: PathBuf,
    file: StoreFile,
}

impl LocalStore {
    /// Open the store at `path`, creating an empty one in memory if the
    /// file does not exist yet (nothing is written until `save`).
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                file: StoreFile {
                    version: CURRENT_VERSION,
                    created_at: Utc::now(),
                    entries: BTreeMap::new(),
                },
            });
        }

        let data = fs::read_to_string(path)?;
        let file: StoreFile = serde_json::from_str(&data)
            .map_err(|e| GlossaError::InvalidStoreFormat(format!("{}: {e}", path.display())))?;

        if file.version != CURRENT_VERSION {
            return Err(GlossaError::InvalidStoreFormat(format!(
                "unsupported store version {}, expected {CURRENT_VERSION}",
                file.version
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Returns the raw JSON value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.file.entries.get(key)
    }

    /// Returns the value under `key` deserialized into `T`.
    ///
    /// `Ok(None)` if the key is absent; an error if the stored value
    /// does not match the expected shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.file.entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| GlossaError::SerializationError(format!("entry '{key}': {e}"))),
        }
    }

    /// Insert or replace the value under `key`.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| GlossaError::SerializationError(format!("entry '{key}': {e}")))?;
        self.file.entries.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove the value under `key`.  Returns `true` if it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.file.entries.remove(key).is_some()
    }

    /// Returns `true` if a value exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.file.entries.contains_key(key)
    }

    /// All keys starting with `prefix`, in sorted order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.file
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Serialize the store and write it to disk atomically.
    ///
    /// The temp file lives in the same directory as the target so the
    /// rename is guaranteed to stay on one filesystem.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.file)
            .map_err(|e| GlossaError::SerializationError(format!("store file: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        ));

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
