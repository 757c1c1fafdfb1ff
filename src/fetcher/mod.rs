pub mod cached;
pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;

pub use cached::CachedFetcher;
pub use http_fetcher::HttpFetcher;
pub use parallel::ParallelFetcher;

/// Read access to the upstream source.
#[async_trait]
pub trait Fetcher {
    /// Current ranked list of top story ids.
    async fn fetch_top_ids(&self) -> Result<Vec<u64>>;

    /// Raw, unvalidated record for `id`. `None` when the source has nothing
    /// under that id.
    async fn fetch_item(&self, id: u64) -> Result<Option<Value>>;
}
