//! Error types shared by the cache, loader and route layers

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a [`CacheStore`](crate::cache::store::CacheStore)
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache record for key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid cache key '{0}' (allowed: A-Z a-z 0-9 _ - ., not starting with '.')")]
    InvalidKey(String),
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures raised while producing a cached value
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file is absent or unreadable
    #[error("source file not found or unreadable: {path}")]
    MissingSourceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file contents are not valid JSON
    #[error("source file is not valid JSON: {path}")]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Failures raised by route dispatch
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    #[error(transparent)]
    Load(#[from] LoadError),
}
