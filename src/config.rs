//! Resolved application configuration
//!
//! Built once from CLI flags (with environment fallbacks) and passed to every
//! handler.

use clap::ValueEnum;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::file::FileStore;
use crate::cache::memory::MemoryStore;
use crate::cache::store::{CacheStore, ExpiryPolicy};
use crate::core::error::CacheError;
use crate::core::paths::google_fonts_path;

/// Which cache store backs the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    /// Process-local map; nothing survives the process
    Memory,
    /// Records under ROOT/.fontcache
    #[default]
    File,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: PathBuf,
    pub source: PathBuf,
    pub store: StoreKind,
    pub expiry: ExpiryPolicy,
}

impl AppConfig {
    /// Resolve configuration; `source` defaults to ROOT/data/google_fonts.json
    pub fn new(
        root: PathBuf,
        source: Option<PathBuf>,
        store: StoreKind,
        ttl_secs: Option<u64>,
    ) -> Self {
        let source = match source {
            Some(path) if path.is_absolute() => path,
            Some(path) => root.join(path),
            None => google_fonts_path(&root),
        };
        Self {
            root,
            source,
            store,
            expiry: ExpiryPolicy::from_ttl_secs(ttl_secs),
        }
    }

    /// Open the configured cache store
    pub fn open_store(&self) -> Result<Arc<dyn CacheStore>, CacheError> {
        let store: Arc<dyn CacheStore> = match self.store {
            StoreKind::Memory => Arc::new(MemoryStore::with_policy(self.expiry)),
            StoreKind::File => Arc::new(FileStore::open(&self.root, self.expiry)?),
        };
        Ok(store)
    }
}
