//! Cache metadata management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk cache format version
pub const CACHE_VERSION: &str = "1";

/// Cache metadata stored in .fontcache/meta.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Cache format version
    pub cache_version: String,

    /// Root directory (absolute path)
    pub root: String,

    /// When the cache directory was initialized
    pub generated_at: DateTime<Utc>,
}

impl CacheMeta {
    pub fn new(root: &str) -> Self {
        Self {
            cache_version: CACHE_VERSION.to_string(),
            root: root.to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn is_current(&self) -> bool {
        self.cache_version == CACHE_VERSION
    }
}

/// One persisted cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    pub key: String,
    pub stored_at: DateTime<Utc>,
    pub value: Value,
}

impl CacheRecord {
    pub fn new(key: &str, value: Value) -> Self {
        Self {
            key: key.to_string(),
            stored_at: Utc::now(),
            value,
        }
    }
}
