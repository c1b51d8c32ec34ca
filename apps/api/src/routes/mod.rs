pub mod diagnostics;
pub mod health;
pub mod keywords;
pub mod locations;

use axum::{
    routing::{get, post},
    Router,
};

use crate::publish::handlers as publish_handlers;
use crate::research::handlers as research_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/test", get(diagnostics::handle_test_services))
        // Reference data
        .route(
            "/api/v1/locations",
            get(locations::handle_list_locations).post(locations::handle_create_location),
        )
        .route("/api/v1/keywords", get(keywords::handle_list_keywords))
        // Research jobs
        .route(
            "/api/v1/research",
            post(research_handlers::handle_create_research)
                .get(research_handlers::handle_list_research),
        )
        // Publishing (PUT is the bulk path)
        .route(
            "/api/v1/publish",
            post(publish_handlers::handle_publish).put(publish_handlers::handle_bulk_publish),
        )
        .with_state(state)
}
