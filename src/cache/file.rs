//! File-backed cache store - Read/write .fontcache/ entries
//!
//! Layout:
//! - `.fontcache/meta.json`: format version and root
//! - `.fontcache/entries/<key>.json`: one `CacheRecord` per key

use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::cache::meta::{CacheMeta, CacheRecord};
use crate::cache::store::{validate_key, CacheStore, ExpiryPolicy};
use crate::core::error::CacheError;
use crate::core::paths::{cache_dir, normalize_path};

/// Metadata file name
pub const META_FILE: &str = "meta.json";

/// Entries subdirectory name
pub const ENTRIES_DIR: &str = "entries";

/// Cache store persisted under a root's .fontcache directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    policy: ExpiryPolicy,
}

impl FileStore {
    /// Open (creating if needed) the cache for `root`.
    ///
    /// A missing or outdated `meta.json` discards all existing entries.
    pub fn open(root: &Path, policy: ExpiryPolicy) -> Result<Self, CacheError> {
        let store = Self {
            dir: cache_dir(root),
            policy,
        };
        let entries = store.entries_dir();
        fs::create_dir_all(&entries).map_err(|e| CacheError::io(&entries, e))?;

        let current = matches!(store.read_meta(), Some(meta) if meta.is_current());
        if !current {
            tracing::debug!(dir = %store.dir.display(), "initializing cache directory");
            store.clear()?;
            store.write_meta(&CacheMeta::new(&normalize_path(root)))?;
        }

        Ok(store)
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entries_dir(&self) -> PathBuf {
        self.dir.join(ENTRIES_DIR)
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.entries_dir().join(format!("{}.json", key))
    }

    fn read_meta(&self) -> Option<CacheMeta> {
        let content = fs::read_to_string(self.dir.join(META_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_meta(&self, meta: &CacheMeta) -> Result<(), CacheError> {
        let path = self.dir.join(META_FILE);
        let json = serde_json::to_string_pretty(meta).map_err(|source| CacheError::Corrupt {
            key: META_FILE.to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(|e| CacheError::io(&path, e))
    }

    fn read_record(&self, key: &str) -> Result<Option<CacheRecord>, CacheError> {
        let path = self.record_path(key);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(&path, e)),
        };
        let record = serde_json::from_slice(&content).map_err(|source| CacheError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(record))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        validate_key(key)?;
        match self.read_record(key)? {
            Some(record) if self.policy.is_expired(record.stored_at, chrono::Utc::now()) => {
                tracing::debug!(key, stored_at = %record.stored_at, "cache entry expired");
                Ok(None)
            }
            Some(record) => Ok(Some(record.value)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        validate_key(key)?;
        let record = CacheRecord::new(key, value);
        let json = serde_json::to_vec(&record).map_err(|source| CacheError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        // Each writer gets its own temp file; the rename makes the record visible whole
        let path = self.record_path(key);
        let entries = self.entries_dir();
        let mut tmp =
            NamedTempFile::new_in(&entries).map_err(|e| CacheError::io(&entries, e))?;
        tmp.write_all(&json)
            .map_err(|e| CacheError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| CacheError::io(&path, e.error))?;

        tracing::debug!(key, path = %path.display(), "stored cache entry on disk");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(&path, e)),
        }
    }

    fn clear(&self) -> Result<(), CacheError> {
        let entries = self.entries_dir();
        let listing = fs::read_dir(&entries).map_err(|e| CacheError::io(&entries, e))?;
        for entry in listing {
            let path = entry.map_err(|e| CacheError::io(&entries, e))?.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| CacheError::io(&path, e))?;
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries_dir();
        let listing = fs::read_dir(&entries).map_err(|e| CacheError::io(&entries, e))?;

        let mut keys = Vec::new();
        for entry in listing {
            let path = entry.map_err(|e| CacheError::io(&entries, e))?.path();
            let key = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => match name.strip_suffix(".json") {
                    Some(key) if validate_key(key).is_ok() => key.to_string(),
                    _ => continue,
                },
                None => continue,
            };
            match self.get(&key) {
                Ok(Some(_)) => keys.push(key),
                Ok(None) => {}
                Err(CacheError::Corrupt { .. }) => {
                    tracing::warn!(key, "skipping corrupt cache record");
                }
                Err(e) => return Err(e),
            }
        }
        keys.sort();
        Ok(keys)
    }
}
