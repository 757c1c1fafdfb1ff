//! Validity windows for the two upstream caches.

use std::time::Duration;

use serde::Deserialize;

use crate::fetcher::cached::{DEFAULT_ITEM_TTL, DEFAULT_TOP_IDS_TTL};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a top story id list is reused (default: 60)
    pub top_ids_ttl_secs: u64,

    /// How long an individual item is reused (default: 3600)
    pub item_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            top_ids_ttl_secs: DEFAULT_TOP_IDS_TTL.as_secs(),
            item_ttl_secs: DEFAULT_ITEM_TTL.as_secs(),
        }
    }
}

impl CacheConfig {
    pub fn top_ids_ttl(&self) -> Duration {
        Duration::from_secs(self.top_ids_ttl_secs)
    }

    pub fn item_ttl(&self) -> Duration {
        Duration::from_secs(self.item_ttl_secs)
    }
}
