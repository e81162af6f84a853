mod cache;
mod config;
mod errors;
mod external;
mod llm_client;
mod matching;
mod models;
mod profile;
mod reference;
mod routes;
mod session;
mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::RedisCache;
use crate::config::Config;
use crate::errors::panic_response;
use crate::llm_client::LlmClient;
use crate::profile::LlmProfileGenerator;
use crate::reference::cached::CachedDirectory;
use crate::reference::postgres::PgTalentStore;
use crate::routes::build_router;
use crate::session::RedisQueryStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let store = Arc::new(PgTalentStore::connect(&config.database_url).await?);

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = RedisCache::new(redis, config.cache_ttl_secs);
    info!("Redis client initialized");

    // Initialize LLM client
    if config.llm_api_key.is_none() {
        warn!("LLM_API_KEY is not set; job profiles will not be generated");
    }
    let llm = LlmClient::new(config.llm_api_key.clone(), config.external_call_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        reference: Arc::new(CachedDirectory::new(store.clone(), cache.clone())),
        audit: store,
        profiles: Arc::new(LlmProfileGenerator::new(llm, Some(cache.clone()))),
        queries: Arc::new(RedisQueryStore::new(cache.with_ttl(config.query_ttl_secs))),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
