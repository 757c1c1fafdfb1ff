//! Time-bounded memoization for upstream reads.
//!
//! Each key owns its own slot behind an async lock. The caller that finds a
//! slot empty or stale performs the fetch while holding it, so concurrent
//! callers for the same key wait for that single request and then read the
//! fresh value. Failed fetches leave the slot untouched.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::app::Result;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) < self.ttl
    }
}

type Slot<V> = Arc<Mutex<Option<Entry<V>>>>;

pub struct TtlCache<K, V> {
    name: &'static str,
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key` if it is still inside its validity
    /// window, otherwise run `fetch` and store its result.
    ///
    /// Expired and never-fetched keys are treated the same.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let slot = self.slot(&key).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(Instant::now()) {
                tracing::debug!("{} cache hit for {:?}", self.name, key);
                return Ok(cached.value.clone());
            }
        }

        tracing::debug!("{} cache miss for {:?}", self.name, key);
        let value = fetch().await?;

        *entry = Some(Entry {
            value: value.clone(),
            inserted_at: Instant::now(),
            ttl: self.ttl,
        });

        Ok(value)
    }

    /// Fresh value for `key` without touching the upstream.
    pub async fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().await.get(key).cloned()?;
        let entry = slot.lock().await;
        let value = entry
            .as_ref()
            .filter(|e| e.is_fresh(Instant::now()))
            .map(|e| e.value.clone());
        value
    }

    pub async fn invalidate(&self, key: &K) {
        self.slots.lock().await.remove(key);
    }

    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Number of keys currently tracked, stale ones included.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop stale entries. Slots some caller still holds are kept.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        let before = slots.len();

        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(entry) => entry.as_ref().is_some_and(|e| e.is_fresh(now)),
                Err(_) => true,
            }
        });

        let removed = before - slots.len();
        if removed > 0 {
            tracing::debug!("{} cache purged {} expired entries", self.name, removed);
        }
        removed
    }

    async fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self.slots.lock().await;
        slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}
