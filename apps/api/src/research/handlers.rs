use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::research::ResearchJobListRow;
use crate::research::workflow::{run_research_job, CreateResearchRequest, ResearchJobResponse};
use crate::state::AppState;

/// POST /api/v1/research
pub async fn handle_create_research(
    State(state): State<AppState>,
    Json(request): Json<CreateResearchRequest>,
) -> Result<Json<ResearchJobResponse>, AppError> {
    Ok(Json(run_research_job(&state, request).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchListQuery {
    pub city_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResearchListResponse {
    pub jobs: Vec<ResearchJobListRow>,
}

/// GET /api/v1/research?cityId=&status=
pub async fn handle_list_research(
    State(state): State<AppState>,
    Query(params): Query<ResearchListQuery>,
) -> Result<Json<ResearchListResponse>, AppError> {
    let jobs: Vec<ResearchJobListRow> = sqlx::query_as(
        r#"
        SELECT r.*, g.city, g.state, g.state_abbr
        FROM research_jobs r
        JOIN geo_locations g ON g.id = r.city_id
        WHERE ($1::uuid IS NULL OR r.city_id = $1)
          AND ($2::text IS NULL OR r.status = $2)
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(params.city_id)
    .bind(params.status)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ResearchListResponse { jobs }))
}
