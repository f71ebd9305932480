//! Callable endpoints and the route table that exposes them

pub mod fonts;
pub mod routes;

use std::sync::Arc;

use crate::cache::loader::CachedFileLoader;
use crate::cache::store::CacheStore;
use crate::config::AppConfig;
use crate::core::error::CacheError;

/// Shared state handed to every endpoint
pub struct Context {
    store: Arc<dyn CacheStore>,
    fonts: CachedFileLoader,
}

impl Context {
    pub fn new(store: Arc<dyn CacheStore>, config: &AppConfig) -> Self {
        let fonts = CachedFileLoader::new(
            Arc::clone(&store),
            fonts::GOOGLE_FONTS_KEY,
            config.source.clone(),
        );
        Self { store, fonts }
    }

    /// Open the configured store and build a context on it
    pub fn from_config(config: &AppConfig) -> Result<Self, CacheError> {
        Ok(Self::new(config.open_store()?, config))
    }

    pub fn store(&self) -> &dyn CacheStore {
        self.store.as_ref()
    }

    pub fn fonts(&self) -> &CachedFileLoader {
        &self.fonts
    }
}
