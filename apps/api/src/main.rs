mod analysis;
mod clock;
mod config;
mod errors;
mod journal;
mod llm_client;
mod models;
mod prompting;
mod routes;
mod state;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::EntryAnalyzer;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::journal::settings::Settings;
use crate::journal::store::{FileStore, KeyValueStore, RedisStore};
use crate::journal::Journal;
use crate::routes::build_router;
use crate::state::{completion_for, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reflect API v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let journal = Journal::load(store.clone(), EntryAnalyzer::default(), clock.now())
        .await
        .context("Failed to load journal entries")?;

    let settings = Settings::load(store.as_ref())
        .await
        .context("Failed to load settings")?;

    // Stored key wins over ANTHROPIC_API_KEY; without either, everything runs locally
    let completion = completion_for(settings.api_key.as_deref(), &config);
    if completion.is_none() {
        info!("No API key configured; companion features use local fallbacks");
    }

    let state = AppState::new(
        config.clone(),
        store,
        Arc::new(journal),
        settings,
        completion,
        clock,
        StdRng::from_entropy(),
    );
    info!("Prompt source: {}", state.prompts.backend());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is set, otherwise one file per key under `REFLECT_DATA_DIR`.
async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            let store = RedisStore::connect(&client)
                .await
                .context("Failed to connect to Redis")?;
            info!("Using Redis store");
            Ok(Arc::new(store))
        }
        None => {
            let store = FileStore::open(&config.data_dir).await.with_context(|| {
                format!("Failed to open data directory {}", config.data_dir.display())
            })?;
            info!("Using file store at {}", config.data_dir.display());
            Ok(Arc::new(store))
        }
    }
}
