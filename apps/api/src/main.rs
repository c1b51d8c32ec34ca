mod config;
mod content;
mod db;
mod errors;
mod llm_client;
mod models;
mod publish;
mod research;
mod routes;
mod seo;
mod state;
mod wordpress;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wordpress::{WordPressClient, WordPressConfig};

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

    info!("Starting LocalPress API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize generation client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("Generation client initialized (model: {})", llm_client::MODEL);

    // Initialize WordPress client
    let wordpress = WordPressClient::new(WordPressConfig {
        site_url: config.wordpress_site_url.clone(),
        username: config.wordpress_username.clone(),
        app_password: config.wordpress_app_password.clone(),
    });
    info!(
        "WordPress client initialized for {}",
        config.wordpress_site_url
    );

    // Build app state
    let state = AppState {
        db,
        llm,
        wordpress,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
