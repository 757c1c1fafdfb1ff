use std::sync::Arc;

use crate::app::Result;
use crate::domain::{Item, Page, PageRequest};
use crate::fetcher::{Fetcher, ParallelFetcher};

/// Turns `(limit, cursor)` requests into pages of displayable stories.
#[derive(Clone)]
pub struct PageAssembler {
    source: Arc<dyn Fetcher + Send + Sync>,
    parallel: ParallelFetcher,
}

impl PageAssembler {
    pub fn new(source: Arc<dyn Fetcher + Send + Sync>, parallel: ParallelFetcher) -> Self {
        Self { source, parallel }
    }

    /// Assemble one page of the current top stories.
    ///
    /// Records that fail to parse or are not displayable stories are skipped,
    /// so a page may hold fewer than `limit` stories (even none). Any upstream
    /// failure fails the whole request.
    pub async fn top_stories(&self, request: PageRequest) -> Result<Page> {
        request.validate()?;

        let skip = request.skip();
        let ids = self.source.fetch_top_ids().await?;
        let window = window(&ids, skip, request.limit);

        let raw = self.parallel.fetch_all(window).await?;
        let stories: Vec<Item> = raw
            .iter()
            .filter_map(|value| value.as_ref().and_then(Item::parse))
            .filter(Item::is_displayable_story)
            .collect();

        let end = skip.saturating_add(request.limit);
        let next_cursor = (end < ids.len()).then_some(end);

        tracing::info!(
            "Assembled page at {}: {} of {} ids kept, next cursor {:?}",
            skip,
            stories.len(),
            window.len(),
            next_cursor
        );

        Ok(Page {
            stories,
            next_cursor,
        })
    }
}

/// `ids[skip..skip + limit]`, clamped to the list; empty past the end.
fn window(ids: &[u64], skip: usize, limit: usize) -> &[u64] {
    let start = skip.min(ids.len());
    let end = skip.saturating_add(limit).min(ids.len());
    &ids[start..end]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::app::FeedError;
    use crate::fetcher::mock::MockFetcher;
    use crate::fetcher::CachedFetcher;

    fn assembler(mock: &Arc<MockFetcher>) -> PageAssembler {
        PageAssembler::new(mock.clone(), ParallelFetcher::new(mock.clone()))
    }

    fn cached_assembler(mock: &Arc<MockFetcher>) -> PageAssembler {
        let gateway: Arc<dyn Fetcher + Send + Sync> = Arc::new(CachedFetcher::with_ttls(
            mock.clone(),
            Duration::from_secs(60),
            Duration::from_secs(3600),
        ));
        PageAssembler::new(gateway.clone(), ParallelFetcher::new(gateway))
    }

    fn ids(page: &Page) -> Vec<u64> {
        page.stories.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_window_bounds() {
        let list = [1, 2, 3, 4, 5];
        assert_eq!(window(&list, 0, 2), &[1, 2]);
        assert_eq!(window(&list, 4, 2), &[5]);
        assert_eq!(window(&list, 5, 2), &[] as &[u64]);
        assert_eq!(window(&list, 100, 2), &[] as &[u64]);
        assert_eq!(window(&list, usize::MAX, 50), &[] as &[u64]);
    }

    #[tokio::test]
    async fn test_first_page_drops_comment() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3, 4, 5]));
        mock.set_item(2, json!({ "id": 2, "type": "comment", "text": "nice" }));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(2, None).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![1]);
        assert_eq!(page.next_cursor, Some(2));
    }

    #[tokio::test]
    async fn test_tail_window_has_no_next_cursor() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3, 4, 5]));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(2, Some(4)).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![5]);
        assert_eq!(page.next_cursor, None);
        assert_eq!(mock.item_calls(), 1);
    }

    #[tokio::test]
    async fn test_tail_window_all_filtered_still_ends() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3, 4]));
        mock.set_ids(vec![1, 2, 3, 4, 5]);
        mock.set_item(5, json!({ "id": 5, "type": "job", "title": "Hiring" }));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(2, Some(4)).unwrap())
            .await
            .unwrap();

        assert!(page.stories.is_empty());
        assert!(page.is_last());
    }

    #[tokio::test]
    async fn test_cursor_past_end_is_empty() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3, 4, 5]));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(20, Some(100)).unwrap())
            .await
            .unwrap();

        assert_eq!(page, Page::empty());
        assert_eq!(mock.item_calls(), 0);
    }

    #[tokio::test]
    async fn test_exact_end_has_no_next_cursor() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3, 4]));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(2, Some(2)).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![3, 4]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_preserves_ranking_order() {
        let ranking = vec![42, 7, 19, 3, 88, 11];
        let mock = Arc::new(MockFetcher::with_stories(ranking.clone()));
        mock.set_item(19, json!({ "id": 19, "type": "story", "title": "t", "dead": true }));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(50, None).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![42, 7, 3, 88, 11]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_ranking_not_completion() {
        let ranking = vec![10, 20, 30, 40];
        let mock = Arc::new(MockFetcher::with_stories(ranking.clone()));
        mock.set_delay(10, Duration::from_millis(400));
        mock.set_delay(20, Duration::from_millis(300));
        mock.set_delay(30, Duration::from_millis(200));
        mock.set_delay(40, Duration::from_millis(100));

        let page = assembler(&mock)
            .top_stories(PageRequest::new(4, None).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), ranking);
    }

    #[tokio::test]
    async fn test_filters_invalid_and_removed_items() {
        let mock = Arc::new(MockFetcher::with_stories((1..=8).collect()));
        mock.set_item(1, json!({ "id": 1, "type": "story" }));
        mock.set_item(2, json!({ "id": 2, "type": "story", "title": "" }));
        mock.set_item(3, json!({ "id": 3, "type": "story", "title": "t", "deleted": true }));
        mock.set_item(4, json!({ "id": 4, "type": "poll", "title": "Poll" }));
        mock.set_item(5, json!({ "id": "five", "type": "story", "title": "t" }));
        mock.set_item(6, json!({ "type": "story", "title": "no id" }));
        mock.remove_item(7);

        let page = assembler(&mock)
            .top_stories(PageRequest::new(8, None).unwrap())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![8]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_length_never_exceeds_limit() {
        let mock = Arc::new(MockFetcher::with_stories((1..=120).collect()));
        let assembler = assembler(&mock);

        for limit in [1, 7, 20, 50] {
            for cursor in [None, Some(0), Some(13), Some(99), Some(119), Some(500)] {
                let page = assembler
                    .top_stories(PageRequest::new(limit, cursor).unwrap())
                    .await
                    .unwrap();
                let skip = cursor.unwrap_or(0);

                assert!(page.stories.len() <= limit);
                if skip + limit >= 120 {
                    assert_eq!(page.next_cursor, None);
                } else {
                    assert_eq!(page.next_cursor, Some(skip + limit));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_id_list_failure_is_source_unavailable() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3]));
        mock.fail_ids(true);

        let err = assembler(&mock)
            .top_stories(PageRequest::default())
            .await
            .unwrap_err();

        assert!(err.is_source_unavailable());
        assert_eq!(mock.item_calls(), 0);
    }

    #[tokio::test]
    async fn test_item_failure_fails_whole_page() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1, 2, 3]));
        mock.fail_item(3);

        let err = assembler(&mock)
            .top_stories(PageRequest::default())
            .await
            .unwrap_err();

        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn test_invalid_limit_rejected_before_fetch() {
        let mock = Arc::new(MockFetcher::with_stories(vec![1]));
        let request = PageRequest {
            limit: 0,
            cursor: None,
        };

        let err = assembler(&mock).top_stories(request).await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidLimit(0)));
        assert_eq!(mock.id_calls(), 0);
    }

    #[tokio::test]
    async fn test_repeat_request_served_from_cache() {
        let mock = Arc::new(MockFetcher::with_stories((1..=10).collect()));
        let assembler = cached_assembler(&mock);
        let request = PageRequest::new(5, Some(2)).unwrap();

        let first = assembler.top_stories(request).await.unwrap();
        let second = assembler.top_stories(request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.id_calls(), 1);
        assert_eq!(mock.item_calls(), 5);
    }
}
