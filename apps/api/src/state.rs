use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::wordpress::WordPressClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub wordpress: WordPressClient,
    pub config: Config,
}
