use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::Duration;

use metrics::counter;
use tokio::time::Instant;

use super::lock::{rw_read, rw_write};
use super::{METRIC_CACHE_HIT_TOTAL, METRIC_CACHE_MISS_TOTAL};

const SOURCE: &str = "cache::store";

struct Entry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

/// Key/value store with a per-entry absolute expiration.
///
/// Expired entries are treated as misses and are overwritten by the next
/// insert for the same key. Time is read from `tokio::time`, so a paused test
/// runtime controls expiry.
pub struct TtlStore<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// `name` labels the hit/miss counters emitted by this store.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let value = rw_read(&self.entries, SOURCE, "get")
            .get(key)
            .filter(|entry| entry.expires_at.is_none_or(|expires_at| expires_at > now))
            .map(|entry| entry.value.clone());

        let metric = if value.is_some() {
            METRIC_CACHE_HIT_TOTAL
        } else {
            METRIC_CACHE_MISS_TOTAL
        };
        counter!(metric, "cache" => self.name).increment(1);

        value
    }

    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        rw_write(&self.entries, SOURCE, "insert").insert(key, Entry { value, expires_at });
    }

    pub fn invalidate(&self, key: &K) {
        rw_write(&self.entries, SOURCE, "invalidate").remove(key);
    }
}
