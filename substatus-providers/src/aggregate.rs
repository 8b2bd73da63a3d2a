//! Concurrent fan-out with TTL memoization.
//!
//! One [`Aggregator::fetch`] call resolves every enabled provider in
//! parallel, merges the statuses back in request order, and caches the
//! merged sequence under the request's credential fingerprint. A later call
//! with an equivalent request set inside the TTL is served from the cache
//! without touching any provider.

use std::sync::Arc;

use substatus_core::{fingerprint, AggregationResult, ProviderRequest};
use substatus_fetch::HttpClient;
use substatus_store::ResultCache;
use tracing::{debug, instrument, warn};

use crate::adapter;

/// Fans requests out across providers and memoizes merged results.
pub struct Aggregator {
    client: HttpClient,
    cache: Arc<ResultCache>,
}

impl Aggregator {
    /// Creates an aggregator over the given cache with a default client.
    pub fn new(cache: Arc<ResultCache>) -> Self {
        Self::with_client(HttpClient::new(), cache)
    }

    /// Creates an aggregator with an explicit client.
    pub fn with_client(client: HttpClient, cache: Arc<ResultCache>) -> Self {
        Self { client, cache }
    }

    /// Resolves all requests, preserving request order in the output.
    ///
    /// Individual provider failures surface as error-flagged entries in the
    /// sequence. Only a lost worker task fails the aggregation as a whole,
    /// and a failed aggregation is never cached.
    #[instrument(skip(self, requests), fields(providers = requests.len()))]
    pub async fn fetch(
        &self,
        requests: &[ProviderRequest],
        ttl: std::time::Duration,
    ) -> AggregationResult {
        if requests.is_empty() {
            return AggregationResult::empty();
        }

        let key = fingerprint(requests);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Serving aggregation from cache");
            return AggregationResult::from_statuses((*cached).clone());
        }

        let handles: Vec<_> = requests
            .iter()
            .map(|request| {
                let client = self.client.clone();
                let request = request.clone();
                tokio::spawn(async move {
                    adapter::fetch_status(&client, request.provider, &request.credential).await
                })
            })
            .collect();

        let joined = futures::future::join_all(handles).await;
        let mut statuses = Vec::with_capacity(joined.len());
        for result in joined {
            match result {
                Ok(status) => statuses.push(status),
                Err(e) => {
                    warn!(error = %e, "Provider worker lost");
                    return AggregationResult::failed(format!("provider worker lost: {e}"));
                }
            }
        }

        self.cache.put(&key, statuses.clone(), ttl).await;
        AggregationResult::from_statuses(statuses)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_request_set_skips_cache() {
        let cache = Arc::new(ResultCache::new());
        let aggregator = Aggregator::new(cache.clone());

        let result = aggregator.fetch(&[], Duration::from_secs(60)).await;
        assert!(result.statuses.is_empty());
        assert!(!result.has_data);
        assert!(result.error.is_none());
        assert!(cache.is_empty().await);
    }
}
