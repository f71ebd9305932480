//! Cache module - Keyed value caching behind an injected store
//!
//! Provides:
//! - The `CacheStore` capability and the `get_value` read-through helper
//! - In-memory and on-disk (.fontcache/) store implementations
//! - Cache metadata management
//! - The cached file loader used by endpoints
//! - Inspection and invalidation commands

pub mod admin;
pub mod file;
pub mod loader;
pub mod memory;
pub mod meta;
pub mod store;
