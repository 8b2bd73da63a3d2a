//! TTL-keyed result cache.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use substatus_core::ProviderStatus;
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

// ============================================================================
// Cache Entry
// ============================================================================

/// One cached status sequence with its lifetime bounds.
struct CacheEntry {
    /// The merged status sequence, shared read-only with callers.
    value: Arc<Vec<ProviderStatus>>,
    /// When the entry was written.
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    /// The entry is visible strictly before this instant.
    expires_at: DateTime<Utc>,
}

// ============================================================================
// Result Cache
// ============================================================================

/// TTL-keyed store mapping a credential fingerprint to a previously
/// computed status sequence.
///
/// There is no capacity bound and no background sweep: an expired entry is
/// logically absent and is evicted lazily on the next read of its key.
/// Writers do not coordinate; concurrent writes to one key are last-write-
/// wins.
pub struct ResultCache {
    inner: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    /// Creates a cache on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a cache with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Stores a value under `key`, unconditionally overwriting any existing
    /// entry for that key.
    pub async fn put(&self, key: &str, value: Vec<ProviderStatus>, ttl: std::time::Duration) {
        let now = self.clock.now();
        // An unrepresentable or overflowing TTL saturates to "never expires".
        let expires_at = Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let entry = CacheEntry {
            value: Arc::new(value),
            created_at: now,
            expires_at,
        };

        let mut inner = self.inner.write().await;
        inner.insert(key.to_string(), entry);
        debug!(entries = inner.len(), "Cached result sequence");
    }

    /// Returns the stored value while the current time is strictly before
    /// its expiry; an expired entry is removed and reported absent.
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<ProviderStatus>>> {
        let now = self.clock.now();
        let mut inner = self.inner.write().await;
        match inner.get(key) {
            Some(entry) if now < entry.expires_at => Some(Arc::clone(&entry.value)),
            Some(_) => {
                inner.remove(key);
                debug!("Evicted expired cache entry");
                None
            }
            None => None,
        }
    }

    /// Returns the number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration as StdDuration;
    use substatus_core::ProviderKind;

    fn sample_statuses() -> Vec<ProviderStatus> {
        vec![ProviderStatus::inactive(ProviderKind::RealDebrid)]
    }

    fn manual_cache() -> (Arc<ManualClock>, ResultCache) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let cache = ResultCache::with_clock(clock.clone());
        (clock, cache)
    }

    #[tokio::test]
    async fn test_get_after_put() {
        let (_clock, cache) = manual_cache();
        cache
            .put("key", sample_statuses(), StdDuration::from_secs(60))
            .await;

        let value = cache.get("key").await.expect("fresh entry present");
        assert_eq!(*value, sample_statuses());
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent_and_evicted() {
        let (clock, cache) = manual_cache();
        cache
            .put("key", sample_statuses(), StdDuration::from_secs(60))
            .await;

        clock.advance(Duration::seconds(61));
        assert!(cache.get("key").await.is_none());

        // The expired entry was removed, and a later read does not
        // resurrect it.
        assert!(cache.is_empty().await);
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn test_entry_visible_until_expiry() {
        let (clock, cache) = manual_cache();
        cache
            .put("key", sample_statuses(), StdDuration::from_secs(60))
            .await;

        clock.advance(Duration::seconds(59));
        assert!(cache.get("key").await.is_some());

        // Exactly at expires_at the entry is no longer visible.
        clock.advance(Duration::seconds(1));
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (clock, cache) = manual_cache();
        cache.put("key", vec![], StdDuration::from_secs(1)).await;
        clock.advance(Duration::milliseconds(900));

        // Re-put resets the expiry window.
        cache
            .put("key", sample_statuses(), StdDuration::from_secs(1))
            .await;
        clock.advance(Duration::milliseconds(900));

        let value = cache.get("key").await.expect("overwritten entry present");
        assert_eq!(value.len(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_huge_ttl_saturates_instead_of_panicking() {
        let (clock, cache) = manual_cache();
        cache
            .put("key", sample_statuses(), StdDuration::MAX)
            .await;

        clock.advance(Duration::days(365_000));
        assert!(cache.get("key").await.is_some());
    }

    #[tokio::test]
    async fn test_distinct_keys_are_independent() {
        let (_clock, cache) = manual_cache();
        cache
            .put("a", sample_statuses(), StdDuration::from_secs(60))
            .await;

        assert!(cache.get("b").await.is_none());
        assert!(cache.get("a").await.is_some());
    }
}
