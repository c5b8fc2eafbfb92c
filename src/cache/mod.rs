// src/cache/mod.rs

//! Durable, keyed storage for materialized task results.
//!
//! A cache entry maps a task name to the serialized bytes of its result.
//! Entry existence is the sole "already computed" signal: once written, an
//! entry is trusted until manually removed. There is no cleanup, versioning
//! or invalidation, and no locking discipline — two concurrent runs against
//! the same root can race on store/load for the same key.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::{HnpipeError, Result};

/// Abstract storage for task results, keyed by task name.
pub trait ResultCache<V> {
    fn exists(&self, key: &str) -> bool;
    fn load(&self, key: &str) -> Result<V>;
    fn store(&mut self, key: &str, value: &V) -> Result<()>;
}

/// Stores each result as `<root>/<key>.json`.
///
/// The root directory is created lazily on first `store`; a missing or
/// unwritable root therefore surfaces as an IO failure at first use rather
/// than at construction time.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl<V: Serialize + DeserializeOwned> ResultCache<V> for FileCache {
    fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    fn load(&self, key: &str) -> Result<V> {
        let path = self.entry_path(key);
        debug!(key = %key, path = ?path, "loading cached result");

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| HnpipeError::DeserializeError {
            key: key.to_string(),
            source,
        })
    }

    fn store(&mut self, key: &str, value: &V) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let path = self.entry_path(key);
        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, value).map_err(|source| HnpipeError::SerializeError {
            key: key.to_string(),
            source,
        })?;

        info!(key = %key, path = ?path, "stored task result (file)");
        Ok(())
    }
}

/// Keeps serialized results in memory only; for tests and dry experiments.
///
/// Values still round-trip through serde_json bytes so that tests exercise
/// the same serialization boundary as [`FileCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Serialize + DeserializeOwned> ResultCache<V> for MemoryCache {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn load(&self, key: &str) -> Result<V> {
        let bytes = self.entries.get(key).ok_or_else(|| {
            HnpipeError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no cache entry for '{key}'"),
            ))
        })?;
        serde_json::from_slice(bytes).map_err(|source| HnpipeError::DeserializeError {
            key: key.to_string(),
            source,
        })
    }

    fn store(&mut self, key: &str, value: &V) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(|source| HnpipeError::SerializeError {
            key: key.to_string(),
            source,
        })?;
        self.entries.insert(key.to_string(), bytes);
        debug!(key = %key, "stored task result (memory)");
        Ok(())
    }
}
