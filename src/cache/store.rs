//! Cache store capability and read-through access

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;

use crate::core::error::CacheError;

/// Allowed cache key shape; keys double as file names in the file store
static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").expect("Invalid KEY_RE regex"));

/// A keyed store of JSON values.
///
/// Implementations decide where values live and when they expire. Concurrent
/// writers to the same key are allowed; the last write wins.
pub trait CacheStore: Send + Sync {
    /// Look up a live (non-expired) value
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Remove a value, returning whether one was present
    fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Remove every value
    fn clear(&self) -> Result<(), CacheError>;

    /// Live keys in sorted order
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// When stored entries stop being served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    #[default]
    Never,
    Ttl(Duration),
}

impl ExpiryPolicy {
    /// Build a policy from an optional TTL in seconds
    pub fn from_ttl_secs(ttl: Option<u64>) -> Self {
        match ttl {
            Some(secs) => ExpiryPolicy::Ttl(Duration::from_secs(secs)),
            None => ExpiryPolicy::Never,
        }
    }

    /// Whether an entry stored at `stored_at` is expired at `now`
    pub fn is_expired(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            ExpiryPolicy::Never => false,
            ExpiryPolicy::Ttl(ttl) => {
                let age = now.signed_duration_since(stored_at);
                // Entries from the future (clock skew) count as fresh
                match age.to_std() {
                    Ok(age) => age >= *ttl,
                    Err(_) => false,
                }
            }
        }
    }
}

/// Reject keys that could not be stored safely
pub fn validate_key(key: &str) -> Result<(), CacheError> {
    if KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

/// Return the cached value for `key`, or run `generator`, store its output and return it.
///
/// A failing generator leaves the store untouched. No lock is held while the
/// generator runs, so concurrent misses may each run it.
pub fn get_value<S, F, E>(store: &S, key: &str, generator: F) -> Result<Value, E>
where
    S: CacheStore + ?Sized,
    F: FnOnce() -> Result<Value, E>,
    E: From<CacheError>,
{
    if let Some(value) = store.get(key)? {
        tracing::debug!(key, "cache hit");
        return Ok(value);
    }

    tracing::debug!(key, "cache miss");
    let value = generator()?;
    store.set(key, value.clone())?;
    Ok(value)
}
