// ABOUTME: Key-value persistence for serialized favorites
// ABOUTME: File-backed store with whole-file replace, plus an in-memory store for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::storage::STORE_FILE_EXTENSION;
use crate::errors::{storage_error, AppError, AppResult};

/// String values stored under string keys
pub trait KeyValueStore {
    /// Value saved under `key`, or `None` if nothing was saved
    ///
    /// # Errors
    ///
    /// Returns a storage error if the value exists but cannot be read.
    fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the value cannot be written.
    fn save(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first save
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the store files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for keys that are not plain names.
    pub fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::invalid_input(format!(
                "Storage key '{key}' may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(self
            .dir
            .join(key)
            .with_extension(STORE_FILE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(
                &format!("Failed to read {}", path.display()),
                e,
            )),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            storage_error(&format!("Failed to create {}", self.dir.display()), e)
        })?;

        // Write beside the target, then rename over it
        let temp_path = path.with_extension("tmp");
        let write_temp = || -> io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()
        };
        write_temp().map_err(|e| {
            storage_error(&format!("Failed to write {}", temp_path.display()), e)
        })?;
        fs::rename(&temp_path, &path).map_err(|e| {
            storage_error(&format!("Failed to replace {}", path.display()), e)
        })?;

        debug!(path = %path.display(), bytes = value.len(), "Saved store file");
        Ok(())
    }
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.insert(key.into(), value.into());
        store
    }

    /// Value currently stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of `save` calls so far
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.saves += 1;
        Ok(())
    }
}
