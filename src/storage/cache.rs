use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use crate::error::Result;

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Query results keyed by request URL.
///
/// An entry older than the caller's `stale_time` is refetched on the next
/// read. With a zero stale time every read goes to the backend and the cache
/// only remembers the last answer. The lock is never held across a fetch, so
/// two concurrent misses on the same key both hit the backend.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key` if it was fetched less than `stale_time` ago.
    pub async fn get<T>(&self, key: &str, stale_time: Duration) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < stale_time)
            .and_then(|entry| entry.value.downcast_ref::<T>())
            .cloned()
    }

    pub async fn insert<T>(&self, key: &str, value: T)
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: Arc::new(value),
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        stale_time: Duration,
        fetch: F,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get::<T>(key, stale_time).await {
            debug!(cache_key = key, "Cache hit");
            return Ok(hit);
        }

        debug!(cache_key = key, "Cache miss or stale entry");
        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Drops the entry for `key`. Returns whether anything was cached.
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!(cache_key = key, removed, "Invalidated query");
        removed
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
