//! Cached file loader - a fixed key backed by a JSON source file
//!
//! On a miss the source file is read, parsed and stored under the key; on a
//! hit the stored value is returned without touching the file.

use serde::Serialize;
use serde_json::Value;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::cache::store::{get_value, CacheStore};
use crate::core::error::LoadError;
use crate::core::file_reader::load_json;

/// Snapshot of loader counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoaderStats {
    pub hits: u64,
    pub misses: u64,
    pub source_reads: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    source_reads: AtomicU64,
}

/// Serves one cache key, filled from a JSON source file on a miss
pub struct CachedFileLoader {
    store: Arc<dyn CacheStore>,
    key: String,
    source: PathBuf,
    counters: Counters,
}

impl CachedFileLoader {
    pub fn new(
        store: Arc<dyn CacheStore>,
        key: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            source: source.into(),
            counters: Counters::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Return the cached value, loading the source file on a miss
    pub fn get_cached_value(&self) -> Result<Value, LoadError> {
        let missed = Cell::new(false);
        let result = get_value(self.store.as_ref(), &self.key, || {
            missed.set(true);
            self.counters.source_reads.fetch_add(1, Ordering::Relaxed);
            load_json(&self.source)
        });

        if missed.get() {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        } else if result.is_ok() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            source_reads: self.counters.source_reads.load(Ordering::Relaxed),
        }
    }
}
