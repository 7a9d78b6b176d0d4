use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pickup_server::cache::{
    CacheConfig, CachedRouteMatrix, DRIVING_PREFIX, MemoryRouteCache, WALKING_PREFIX,
};
use pickup_server::ors::{OrsClient, OrsConfig};
use pickup_server::overpass::{MockStreetGeometry, OverpassClient, OverpassConfig, StreetSource};
use pickup_server::pipeline::{Pipeline, PipelineConfig};
use pickup_server::pricing::{PricingClient, PricingConfig};
use pickup_server::tomtom::{TomTomClient, TomTomConfig};
use pickup_server::web::{AppState, create_router};

/// Default bind address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default pricing endpoint for a locally running model.
const DEFAULT_PRICING_URL: &str = "http://127.0.0.1:8000/predict";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read a required-in-practice variable, warning when it's missing.
fn env_or_warn(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        warn!("{name} not set. API calls will fail.");
        String::new()
    })
}

/// Read a TTL in seconds, falling back to `default` when unset or invalid.
fn env_ttl(name: &str, default: Duration) -> Duration {
    match std::env::var(name) {
        Ok(value) => match value.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(value, "{name} is not a whole number of seconds; using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn street_source() -> Result<StreetSource, BoxError> {
    if let Ok(path) = std::env::var("PICKUP_MOCK_GEOMETRY") {
        let fixture = MockStreetGeometry::from_file(&path)?;
        info!(path, streets = fixture.len(), "Using street geometry fixture");
        return Ok(StreetSource::Fixture(fixture));
    }

    let mut config = OverpassConfig::default();
    if let Ok(url) = std::env::var("OVERPASS_API_URL") {
        config = config.with_base_url(url);
    }
    Ok(StreetSource::Live(OverpassClient::new(config)?))
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let defaults = PipelineConfig::default();
    let config = PipelineConfig::default()
        .with_walking_cache_ttl(env_ttl("ORS_TTL", defaults.walking_cache_ttl))
        .with_driving_cache_ttl(env_ttl("TT_TTL", defaults.driving_cache_ttl));

    let geometry = street_source()?;

    let ors = OrsClient::new(OrsConfig::new(env_or_warn("ORS_API_KEY")))?;

    let mut tomtom_config = TomTomConfig::new(env_or_warn("TOMTOM_API_KEY"));
    if let Ok(url) = std::env::var("TOMTOM_API_URL") {
        tomtom_config = tomtom_config.with_base_url(url);
    }
    let tomtom = TomTomClient::new(tomtom_config)?;

    let pricing_url =
        std::env::var("PRICING_API_URL").unwrap_or_else(|_| DEFAULT_PRICING_URL.to_string());
    let pricing = PricingClient::new(PricingConfig::new(pricing_url))?;

    // Both route providers share one cache; prefixes keep them apart
    let cache = MemoryRouteCache::new(&CacheConfig::default());
    let walking = CachedRouteMatrix::new(
        ors,
        cache.clone(),
        WALKING_PREFIX,
        config.walking_cache_ttl,
    );
    let driving = CachedRouteMatrix::new(tomtom, cache, DRIVING_PREFIX, config.driving_cache_ttl);

    info!(
        geometry = geometry.name(),
        rings = config.rings.len(),
        deadline = ?config.deadline,
        "Pipeline configured"
    );

    let state = AppState::new(Pipeline::new(geometry, walking, driving, pricing, config));
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("PICKUP_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Pickup planner listening on http://{addr}");
    info!("  GET  /health  - Health check");
    info!("  POST /rides   - Plan pickup rides");

    axum::serve(listener, app).await?;

    Ok(())
}
