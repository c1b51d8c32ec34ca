use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::publish::workflow::{
    bulk_publish_jobs, publish_research_job, BulkPublishResponse, PublishResponse,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub research_job_id: Option<Uuid>,
}

/// POST /api/v1/publish
pub async fn handle_publish(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, AppError> {
    let research_job_id = request.research_job_id.ok_or_else(|| {
        AppError::Validation("Missing required field: researchJobId".to_string())
    })?;
    Ok(Json(publish_research_job(&state, research_job_id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPublishRequest {
    #[serde(default)]
    pub research_job_ids: Vec<Uuid>,
}

/// PUT /api/v1/publish
pub async fn handle_bulk_publish(
    State(state): State<AppState>,
    Json(request): Json<BulkPublishRequest>,
) -> Result<Json<BulkPublishResponse>, AppError> {
    Ok(Json(
        bulk_publish_jobs(&state, &request.research_job_ids).await?,
    ))
}
