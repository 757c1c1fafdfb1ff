use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::app::{FeedError, Result};
use crate::fetcher::Fetcher;

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves a window of ids concurrently, returning records in input order.
#[derive(Clone)]
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetch every id and collect the raw records by position.
    ///
    /// Returns as soon as any fetch fails. Tasks still running at that point
    /// are detached and left to finish on their own.
    pub async fn fetch_all(&self, ids: &[u64]) -> Result<Vec<Option<Value>>> {
        let joins = ids.iter().map(|&id| {
            let handle = tokio::spawn(fetch_single_item(
                self.fetcher.clone(),
                self.semaphore.clone(),
                id,
            ));

            async move {
                handle
                    .await
                    .map_err(|e| FeedError::Other(format!("Task join error: {}", e)))?
                    .inspect_err(|e| tracing::warn!("Failed to fetch item {}: {}", id, e))
            }
        });

        try_join_all(joins).await
    }
}

async fn fetch_single_item(
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
    id: u64,
) -> Result<Option<Value>> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|e| FeedError::Other(format!("Worker pool closed: {}", e)))?;
    fetcher.fetch_item(id).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::fetcher::mock::MockFetcher;

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_input_order() {
        let mock = Arc::new(MockFetcher::with_stories(vec![5, 3, 9, 1]));
        // Earlier positions finish last.
        mock.set_delay(9, Duration::from_millis(400));
        mock.set_delay(1, Duration::from_millis(300));
        mock.set_delay(5, Duration::from_millis(200));
        mock.set_delay(3, Duration::from_millis(100));
        let parallel = ParallelFetcher::new(mock.clone());

        let raw = parallel.fetch_all(&[9, 1, 5, 3]).await.unwrap();
        let ids: Vec<u64> = raw
            .iter()
            .map(|v| v.as_ref().unwrap()["id"].as_u64().unwrap())
            .collect();

        assert_eq!(ids, vec![9, 1, 5, 3]);
        assert_eq!(mock.item_calls(), 4);
    }

    #[tokio::test]
    async fn test_missing_items_are_none() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1]));
        let parallel = ParallelFetcher::new(mock);

        let raw = parallel.fetch_all(&[1, 2]).await.unwrap();
        assert!(raw[0].is_some());
        assert!(raw[1].is_none());
    }

    #[tokio::test]
    async fn test_single_failure_fails_batch() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3]));
        mock.fail_item(2);
        let parallel = ParallelFetcher::new(mock);

        let err = parallel.fetch_all(&[1, 2, 3]).await.unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_returns_without_waiting_for_slow_items() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2]));
        mock.set_delay(1, Duration::from_secs(30));
        mock.fail_item(2);
        let parallel = ParallelFetcher::new(mock.clone());

        let started = Instant::now();
        let err = parallel.fetch_all(&[1, 2]).await.unwrap_err();

        assert!(err.is_source_unavailable());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_empty_window() {
        let mock = Arc::new(MockFetcher::default());
        let parallel = ParallelFetcher::new(mock.clone());

        assert!(parallel.fetch_all(&[]).await.unwrap().is_empty());
        assert_eq!(mock.item_calls(), 0);
    }
}
