//! Crypto Intelligence Agent Server
//!
//! Axum-based chat transport over the crypto-intel core. Wires the market
//! and news fetchers, the session store, and the optional ASI1/Metta
//! enhancement services.

mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::session::MemorySessionStore;
use agent_runtime::{Asi1Enhancer, MettaKnowledge};
use crypto_intel::{
    CoinGeckoClient, IntelConfig, MarketService, NewsService, QueryHandler, RateLimiter,
    RssClient,
};

use crate::handlers::{chat_handler, health_check};
use crate::state::AppState;

/// Feed fetch timeout; generous because some feeds are slow
const FEED_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = IntelConfig::from_env();

    // Market + news fetch services
    let market_source = Arc::new(CoinGeckoClient::new(config.market.clone())?);
    let news_source = Arc::new(RssClient::new(FEED_TIMEOUT)?);
    let limiter = Arc::new(RateLimiter::new());

    let market = MarketService::new(market_source, limiter, &config);
    let news = NewsService::new(news_source, &config);

    let mut handler = QueryHandler::new(market, news, config.limits);

    // Optional ASI1 LLM enhancement
    let asi1 = Asi1Enhancer::from_env()?;
    if asi1.enabled() {
        tracing::info!("✓ ASI1 LLM enhancement enabled");
        handler = handler.with_enhancer(Arc::new(asi1));
    } else {
        tracing::warn!("⚠ ASI1 not configured - responses will not be rewritten");
        tracing::warn!("  Set ASI1_API_KEY in .env to enable");
    }

    // Optional Metta knowledge graph
    let metta = MettaKnowledge::from_env()?;
    if metta.enabled() {
        tracing::info!("✓ Metta knowledge graph enabled");
        handler = handler.with_knowledge(Arc::new(metta));
    } else {
        tracing::warn!("⚠ Metta not configured - no contextual knowledge");
        tracing::warn!("  Set METTA_API_KEY in .env to enable");
    }

    // Build application state
    let state = AppState {
        handler: Arc::new(handler),
        sessions: Arc::new(MemorySessionStore::new()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 crypto intelligence agent on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  POST /api/chat  - Send a chat turn");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
