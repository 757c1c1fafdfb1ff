use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::feed::{FeedSession, PageAssembler};
use crate::fetcher::{CachedFetcher, Fetcher, HttpFetcher, ParallelFetcher};

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub assembler: PageAssembler,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let upstream: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.source)?);
        Ok(Self::with_upstream(config, upstream))
    }

    /// Wire the caching gateway and assembler around any upstream.
    pub fn with_upstream(config: Config, upstream: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(CachedFetcher::with_ttls(
            upstream,
            config.cache.top_ids_ttl(),
            config.cache.item_ttl(),
        ));
        let parallel = ParallelFetcher::with_workers(fetcher.clone(), config.source.workers);
        let assembler = PageAssembler::new(fetcher.clone(), parallel);

        Self {
            config,
            fetcher,
            assembler,
        }
    }

    /// A fresh infinite-loading session using the configured page size.
    pub fn session(&self, page_size: Option<usize>, cursor: Option<usize>) -> Result<FeedSession> {
        let page_size = page_size.unwrap_or(self.config.feed.page_size);
        FeedSession::starting_at(self.assembler.clone(), page_size, cursor)
    }
}
