use crate::infrastructure::clock::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time-expiring key-value store shared across requests.
///
/// Implementations must be safe for concurrent readers and writers. A `set`
/// replaces any previous value for the key atomically.
#[async_trait]
pub trait CacheStore<V: Clone + Send + Sync + 'static>: Send + Sync {
    /// Returns the value for `key` unless it is missing or its TTL has elapsed.
    async fn get(&self, key: &str) -> Option<V>;

    async fn set(&self, key: &str, value: V, ttl: Duration);

    async fn invalidate(&self, key: &str);
}

#[derive(Clone)]
struct StoredEntry<V> {
    value: V,
    ttl: Duration,
    expires_at: DateTime<Utc>,
}

/// Lets moka evict each entry once its own TTL has passed.
struct PerEntryTtl;

impl<V> Expiry<String, StoredEntry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache store backed by moka.
///
/// Expiry is checked against the injected [`Clock`] on every read, so tests can
/// move time forward without sleeping. moka's own per-entry expiry only frees
/// memory.
pub struct MokaCacheStore<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, StoredEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send + Sync + 'static> MokaCacheStore<V> {
    pub fn new(max_capacity: u64, clock: Arc<dyn Clock>) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache, clock }
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> CacheStore<V> for MokaCacheStore<V> {
    async fn get(&self, key: &str) -> Option<V> {
        let entry = self.cache.get(key).await?;
        // Expired entries stay until moka's own expiry or the next `set`.
        if entry.expires_at <= self.clock.now() {
            tracing::debug!(cache_key = key, "Cache entry expired");
            return None;
        }
        Some(entry.value)
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.cache
            .insert(
                key.to_string(),
                StoredEntry {
                    value,
                    ttl,
                    expires_at,
                },
            )
            .await;
    }

    async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
