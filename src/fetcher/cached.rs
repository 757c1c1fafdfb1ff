use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;
use crate::cache::TtlCache;
use crate::fetcher::Fetcher;

const TOP_IDS_KEY: &str = "topstories";

pub const DEFAULT_TOP_IDS_TTL: Duration = Duration::from_secs(60);
pub const DEFAULT_ITEM_TTL: Duration = Duration::from_secs(3600);

pub type TopIdsCache = TtlCache<&'static str, Vec<u64>>;
pub type ItemCache = TtlCache<u64, Option<Value>>;

/// Memoizing front for another [`Fetcher`].
///
/// The id list and the per-item records live in separate caches with their
/// own validity windows. Both are shared handles so several gateways (or
/// tests) can observe the same state.
pub struct CachedFetcher {
    inner: Arc<dyn Fetcher + Send + Sync>,
    top_ids: Arc<TopIdsCache>,
    items: Arc<ItemCache>,
}

impl CachedFetcher {
    pub fn new(
        inner: Arc<dyn Fetcher + Send + Sync>,
        top_ids: Arc<TopIdsCache>,
        items: Arc<ItemCache>,
    ) -> Self {
        Self {
            inner,
            top_ids,
            items,
        }
    }

    pub fn with_ttls(
        inner: Arc<dyn Fetcher + Send + Sync>,
        top_ids_ttl: Duration,
        item_ttl: Duration,
    ) -> Self {
        Self::new(
            inner,
            Arc::new(TtlCache::new("top ids", top_ids_ttl)),
            Arc::new(TtlCache::new("item", item_ttl)),
        )
    }

    pub fn top_ids_cache(&self) -> &Arc<TopIdsCache> {
        &self.top_ids
    }

    pub fn item_cache(&self) -> &Arc<ItemCache> {
        &self.items
    }
}

#[async_trait]
impl Fetcher for CachedFetcher {
    async fn fetch_top_ids(&self) -> Result<Vec<u64>> {
        self.top_ids
            .get_or_fetch(TOP_IDS_KEY, || async {
                let ids = self.inner.fetch_top_ids().await?;
                // Stale item entries go whenever the ranking is refreshed.
                self.items.purge_expired().await;
                Ok(ids)
            })
            .await
    }

    async fn fetch_item(&self, id: u64) -> Result<Option<Value>> {
        self.items
            .get_or_fetch(id, || self.inner.fetch_item(id))
            .await
    }
}
