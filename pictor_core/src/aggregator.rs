//! Concurrent fan-out/fan-in across the three providers.
//!
//! One aggregation spawns exactly three concurrent provider calls, waits for
//! all of them (a join barrier, not a race), and concatenates the normalized
//! records in fixed provider order: Unsplash, Pixabay, Storyblocks. A
//! provider failure degrades to an empty contribution; aggregation never
//! hard-fails once the caller is authenticated.

use std::sync::Arc;

use crate::auth::{AccessGate, Identity};
use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{AuthError, ProviderError};
use crate::providers::{
    ImageProvider, PixabayProvider, StoryblocksProvider, UnsplashProvider,
};
use crate::types::{AggregationResult, ImageRecord};

pub struct Aggregator {
    unsplash: UnsplashProvider,
    pixabay: PixabayProvider,
    storyblocks: StoryblocksProvider,
    cache: Option<Arc<dyn ResultCache>>,
}

impl Aggregator {
    /// Build an aggregator with default provider endpoints.
    pub fn new(config: &Config) -> Self {
        Self::with_providers(
            UnsplashProvider::new(config),
            PixabayProvider::new(config),
            StoryblocksProvider::new(config),
        )
    }

    /// Build from pre-constructed adapters, e.g. ones pointed at test hosts.
    pub fn with_providers(
        unsplash: UnsplashProvider,
        pixabay: PixabayProvider,
        storyblocks: StoryblocksProvider,
    ) -> Self {
        Self {
            unsplash,
            pixabay,
            storyblocks,
            cache: None,
        }
    }

    /// Enable the pass-through result cache.
    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Aggregate results for one query.
    ///
    /// Assumes the caller already passed the access gate; `identity` is
    /// forwarded to providers that attribute usage. With a cache attached, a
    /// hit is returned verbatim without contacting any provider, and a fresh
    /// result is stored back under the exact incoming query string.
    /// Concurrent same-query requests may both miss and both store; the last
    /// writer wins.
    pub async fn aggregate(&self, query: &str, identity: &Identity) -> AggregationResult {
        if let Some(cached) = self.cache_lookup(query) {
            return cached;
        }

        // All three run concurrently; dropping this future drops them together.
        let (unsplash, pixabay, storyblocks) = futures::future::join3(
            degrade(&self.unsplash, query, identity),
            degrade(&self.pixabay, query, identity),
            degrade(&self.storyblocks, query, identity),
        )
        .await;

        let mut merged = unsplash;
        merged.extend(pixabay);
        merged.extend(storyblocks);

        self.cache_store(query, &merged);
        merged
    }

    fn cache_lookup(&self, query: &str) -> Option<AggregationResult> {
        let cache = self.cache.as_ref()?;
        match cache.lookup(query) {
            Ok(Some(result)) => {
                tracing::debug!(query, records = result.len(), "Cache hit");
                Some(result)
            }
            Ok(None) => None,
            Err(e) => {
                // Soft failure: behave as if caching were disabled.
                tracing::warn!(query, error = %e, "Cache lookup failed, falling through to providers");
                None
            }
        }
    }

    fn cache_store(&self, query: &str, result: &AggregationResult) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        match cache.store(query, result) {
            Ok(()) => tracing::debug!(query, records = result.len(), "Cached aggregation result"),
            Err(e) => tracing::warn!(query, error = %e, "Failed to cache aggregation result"),
        }
    }
}

/// Run one provider call, mapping any failure to an empty contribution.
async fn degrade(
    provider: &dyn ImageProvider,
    query: &str,
    identity: &Identity,
) -> Vec<ImageRecord> {
    match provider.search(query, Some(identity)).await {
        Ok(records) => records,
        Err(e @ ProviderError::MalformedResponse { .. }) => {
            // Defect class, not transport noise; operators need to see it.
            tracing::error!(provider = %provider.source(), error = %e, "Malformed provider response, degrading to empty");
            vec![]
        }
        Err(e) => {
            tracing::warn!(provider = %provider.source(), error = %e, "Provider failed, degrading to empty");
            vec![]
        }
    }
}

/// Gate-then-aggregate composition for callers holding a raw credential
/// token.
pub struct SearchService {
    gate: Arc<dyn AccessGate>,
    aggregator: Aggregator,
}

impl SearchService {
    pub fn new(gate: Arc<dyn AccessGate>, aggregator: Aggregator) -> Self {
        Self { gate, aggregator }
    }

    /// Authenticate, then aggregate. A rejected token short-circuits before
    /// any provider or cache work happens.
    pub async fn search(&self, token: &str, query: &str) -> Result<AggregationResult, AuthError> {
        let identity = self.gate.authenticate(token)?;
        tracing::debug!(caller = %identity, query, "Authenticated search request");
        Ok(self.aggregator.aggregate(query, &identity).await)
    }
}
