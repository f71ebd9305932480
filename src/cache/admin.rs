//! Cache administration commands

use anyhow::{bail, Result};
use serde_json::json;

use crate::cache::store::CacheStore;
use crate::core::render::{RenderConfig, Renderer};

/// Print live cache keys
pub fn run_list(store: &dyn CacheStore, config: RenderConfig) -> Result<()> {
    let keys = store.keys()?;
    Renderer::with_config(config).render_to(&json!(keys), std::io::stdout().lock())?;
    Ok(())
}

/// Print the cached value for `key`
pub fn run_get(store: &dyn CacheStore, key: &str, config: RenderConfig) -> Result<()> {
    let Some(value) = store.get(key)? else {
        bail!("No cached value for key '{}'", key);
    };
    Renderer::with_config(config).render_to(&value, std::io::stdout().lock())?;
    Ok(())
}

/// Remove one key, or everything when `key` is None
pub fn run_clear(store: &dyn CacheStore, key: Option<&str>, config: RenderConfig) -> Result<()> {
    let cleared: Vec<String> = match key {
        Some(key) => {
            if store.delete(key)? {
                vec![key.to_string()]
            } else {
                Vec::new()
            }
        }
        None => {
            // Listing is best-effort; clearing must still work on a damaged cache
            let keys = store.keys().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not list cache keys before clearing");
                Vec::new()
            });
            store.clear()?;
            keys
        }
    };
    tracing::info!(count = cleared.len(), "cleared cache entries");
    Renderer::with_config(config)
        .render_to(&json!({ "cleared": cleared }), std::io::stdout().lock())?;
    Ok(())
}
