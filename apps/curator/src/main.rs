mod acrostic;
mod config;
mod curation;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::curation::jsonl::read_jsonl_file;
use crate::curation::models::StudentSample;
use crate::curation::store::ExampleStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting curator v{}", env!("CARGO_PKG_VERSION"));

    // Curated set: read once, rewritten only via explicit export
    let store = ExampleStore::load(&config.examples_path)
        .with_context(|| format!("Failed to load examples from {}", config.examples_path.display()))?;
    if store.is_empty() {
        warn!("No curated examples loaded; prompts will carry no few-shot blocks");
    }

    let samples: Vec<StudentSample> = read_jsonl_file(&config.samples_path)
        .with_context(|| format!("Failed to load samples from {}", config.samples_path.display()))?;
    info!("Loaded {} student sample(s)", samples.len());

    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone());
    info!(
        "LLM client initialized (model: {}, keyword: {})",
        llm_client::MODEL,
        config.keyword
    );

    let state = AppState::new(store, samples, Arc::new(llm), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
