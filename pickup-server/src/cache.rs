//! Coordinate-keyed route cache.
//!
//! Route summaries are cached per (source, destination) pair, keyed by the
//! coordinates rounded to 6 decimal places. Walking and driving routes use
//! different key prefixes and TTLs: walking times barely change, driving
//! times follow traffic.
//!
//! [`CachedRouteMatrix`] sits in front of any [`RouteMatrixProvider`] and
//! only asks the live provider for pairs the cache doesn't have.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{CoordKey, Location, RouteSummary};
use crate::pipeline::{PipelineError, RouteMatrixProvider};

/// Key prefix for walking routes.
pub const WALKING_PREFIX: &str = "ors";

/// Key prefix for driving routes.
pub const DRIVING_PREFIX: &str = "tt";

/// Cache key for the route from `source` to `destination`.
///
/// Built from [`CoordKey`] so keys agree with every other place that decides
/// whether two coordinates are the same point.
pub fn route_key(prefix: &str, source: &Location, destination: &Location) -> String {
    format!("{}-{}-{}", prefix, source.key(), destination.key())
}

/// Key-value store for route summaries.
///
/// A miss is never an error; callers fall back to a live provider.
pub trait RouteCache: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Option<RouteSummary>> + Send;

    fn set(
        &self,
        key: String,
        summary: RouteSummary,
        ttl: Duration,
    ) -> impl Future<Output = ()> + Send;

    /// Every key that is present; absent keys are simply left out.
    fn get_multi(
        &self,
        keys: &[String],
    ) -> impl Future<Output = HashMap<String, RouteSummary>> + Send;
}

/// Configuration for the in-memory cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedRoute {
    summary: RouteSummary,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, CachedRoute> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedRoute,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedRoute,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process route cache backed by moka.
#[derive(Clone)]
pub struct MemoryRouteCache {
    routes: MokaCache<String, CachedRoute>,
}

impl MemoryRouteCache {
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { routes }
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}

impl RouteCache for MemoryRouteCache {
    async fn get(&self, key: &str) -> Option<RouteSummary> {
        self.routes.get(key).await.map(|entry| entry.summary)
    }

    async fn set(&self, key: String, summary: RouteSummary, ttl: Duration) {
        self.routes.insert(key, CachedRoute { summary, ttl }).await;
    }

    async fn get_multi(&self, keys: &[String]) -> HashMap<String, RouteSummary> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(entry) = self.routes.get(key).await {
                found.insert(key.clone(), entry.summary);
            }
        }
        found
    }
}

/// Route-matrix provider with a read-through cache.
///
/// Looks every requested pair up in the cache first. Misses are fetched
/// in one call covering the missed sources × missed destinations, stored
/// with this wrapper's TTL, and merged back in request order.
pub struct CachedRouteMatrix<P, C> {
    provider: P,
    cache: C,
    prefix: &'static str,
    ttl: Duration,
}

impl<P, C> CachedRouteMatrix<P, C> {
    pub fn new(provider: P, cache: C, prefix: &'static str, ttl: Duration) -> Self {
        Self {
            provider,
            cache,
            prefix,
            ttl,
        }
    }

    /// Access the underlying provider for calls that bypass the cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Locations in first-seen order, collapsing repeats of the same coordinate.
fn unique(locations: impl IntoIterator<Item = Location>) -> Vec<Location> {
    let mut seen = HashSet::<CoordKey>::new();
    locations
        .into_iter()
        .filter(|loc| seen.insert(loc.key()))
        .collect()
}

impl<P: RouteMatrixProvider, C: RouteCache> RouteMatrixProvider for CachedRouteMatrix<P, C> {
    async fn route_matrix(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, PipelineError> {
        let pairs: Vec<(Location, Location)> = sources
            .iter()
            .flat_map(|src| destinations.iter().map(move |dst| (*src, *dst)))
            .collect();

        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = pairs
            .iter()
            .map(|(src, dst)| route_key(self.prefix, src, dst))
            .collect();

        let mut routes = self.cache.get_multi(&keys).await;

        let missed: Vec<(Location, Location)> = pairs
            .iter()
            .zip(&keys)
            .filter(|(_, key)| !routes.contains_key(*key))
            .map(|(pair, _)| *pair)
            .collect();

        debug!(
            prefix = self.prefix,
            hits = pairs.len() - missed.len(),
            misses = missed.len(),
            "Route cache lookup"
        );

        if !missed.is_empty() {
            let missed_sources = unique(missed.iter().map(|(src, _)| *src));
            let missed_destinations = unique(missed.iter().map(|(_, dst)| *dst));

            let fetched = self
                .provider
                .route_matrix(&missed_sources, &missed_destinations)
                .await?;

            let expected = missed_sources.len() * missed_destinations.len();
            if fetched.len() != expected {
                return Err(PipelineError::MatrixSize {
                    expected,
                    got: fetched.len(),
                });
            }

            let fetched_pairs: Vec<(Location, Location)> = missed_sources
                .iter()
                .flat_map(|src| missed_destinations.iter().map(move |dst| (*src, *dst)))
                .collect();

            for ((src, dst), summary) in fetched_pairs.into_iter().zip(fetched) {
                let key = route_key(self.prefix, &src, &dst);
                self.cache.set(key.clone(), summary.clone(), self.ttl).await;
                routes.insert(key, summary);
            }
        }

        pairs
            .into_iter()
            .zip(&keys)
            .map(|((source, destination), key)| {
                let summary = routes.get(key).ok_or(PipelineError::MatrixSize {
                    expected: keys.len(),
                    got: routes.len(),
                })?;

                // Cached entries may have been stored for a coordinate that
                // only matches to 6 decimal places
                Ok(RouteSummary {
                    source,
                    destination,
                    ..summary.clone()
                })
            })
            .collect()
    }
}
