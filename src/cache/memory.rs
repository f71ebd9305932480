//! In-process cache store

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::store::{validate_key, CacheStore, ExpiryPolicy};
use crate::core::error::CacheError;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    stored_at: DateTime<Utc>,
}

/// A map of values shared across threads
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    policy: ExpiryPolicy,
}

impl MemoryStore {
    pub fn with_policy(policy: ExpiryPolicy) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy,
        }
    }

    // A poisoned lock only means a writer panicked mid-insert; the map itself is intact
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        validate_key(key)?;
        let now = Utc::now();
        let entries = self.read();
        match entries.get(key) {
            Some(entry) if self.policy.is_expired(entry.stored_at, now) => {
                tracing::debug!(key, "cache entry expired");
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        validate_key(key)?;
        self.write().insert(
            key.to_string(),
            Entry {
                value,
                stored_at: Utc::now(),
            },
        );
        tracing::debug!(key, "stored cache entry in memory");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        Ok(self.write().remove(key).is_some())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.write().clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let now = Utc::now();
        let mut keys: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, entry)| !self.policy.is_expired(entry.stored_at, now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
