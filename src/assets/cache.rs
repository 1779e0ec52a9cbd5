//! In-memory memo of finished asset records.
//!
//! Only records whose status is `ready` are admitted. Entries are never
//! expired or refreshed: once an asset is ready, later reads through the
//! owning service are answered from memory for the lifetime of the cache.

use dashmap::DashMap;
use vidasset_common::Asset;

/// Thread-safe cache of `ready` assets keyed by storage key.
#[derive(Default)]
pub struct AssetCache {
    entries: DashMap<String, Asset>,
}

impl AssetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached record for `key`, or `None` on a miss.
    pub fn lookup(&self, key: &str) -> Option<Asset> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `asset` under `key` if it is ready.
    ///
    /// Any other status is ignored. Returns whether the record was stored.
    pub fn insert(&self, key: &str, asset: &Asset) -> bool {
        if !asset.is_ready() {
            return false;
        }
        self.entries.insert(key.to_string(), asset.clone());
        true
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
