use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: bool,
    pub wordpress: bool,
    pub anthropic: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceTestResponse {
    pub success: bool,
    pub services: ServiceStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// GET /api/v1/test
/// Probes every external dependency; 500 when any probe fails so the
/// dashboard can surface a misconfigured deployment at a glance.
pub async fn handle_test_services(
    State(state): State<AppState>,
) -> (StatusCode, Json<ServiceTestResponse>) {
    let mut errors = Vec::new();

    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            errors.push(format!("Database: {e}"));
            false
        }
    };

    let wordpress = state.wordpress.test_connection().await;
    if !wordpress {
        errors.push("WordPress: Connection failed".to_string());
    }

    let anthropic = !state.config.anthropic_api_key.is_empty();
    if !anthropic {
        errors.push("Anthropic: API key not configured".to_string());
    }

    let success = database && wordpress && anthropic;
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ServiceTestResponse {
            success,
            services: ServiceStatus {
                database,
                wordpress,
                anthropic,
            },
            errors,
        }),
    )
}
