mod config;
mod errors;
mod llm_client;
mod questions;
mod routes;
mod skills;
mod state;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::questions::generative::GenerativeStrategy;
use crate::questions::selector::{QuestionSelector, QuestionStrategy};
use crate::questions::static_bank::StaticFallbackStrategy;
use crate::routes::build_router;
use crate::skills::{AliasTable, SkillExtractor, Taxonomy};
use crate::state::AppState;

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

    info!("Starting Resume IQ API v{}", env!("CARGO_PKG_VERSION"));

    // Taxonomy and aliases are immutable for the life of the process
    let taxonomy = match &config.taxonomy_path {
        Some(path) => Taxonomy::from_path(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => Taxonomy::bundled().context("Bundled taxonomy is invalid")?,
    };
    let taxonomy = Arc::new(taxonomy);
    let aliases = AliasTable::bundled().context("Bundled alias table is invalid")?;
    info!(
        "Taxonomy loaded: {} pools, {} aliases",
        taxonomy.len(),
        aliases.len()
    );

    let extractor =
        SkillExtractor::new(&taxonomy, &aliases).context("Failed to compile skill patterns")?;

    let generative: Option<Arc<dyn QuestionStrategy>> = match &config.gemini_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(api_key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GenerativeStrategy::new(llm)))
        }
        None => {
            warn!("GEMINI_API_KEY not set. Falling back to static questions.");
            None
        }
    };
    let selector = QuestionSelector::new(generative, StaticFallbackStrategy::new(taxonomy));

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(extractor),
        selector: Arc::new(selector),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
