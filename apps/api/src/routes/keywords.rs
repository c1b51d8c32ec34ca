use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::keyword::KeywordRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordListQuery {
    pub city_id: Option<Uuid>,
}

/// GET /api/v1/keywords?cityId=
pub async fn handle_list_keywords(
    State(state): State<AppState>,
    Query(params): Query<KeywordListQuery>,
) -> Result<Json<Vec<KeywordRow>>, AppError> {
    let keywords: Vec<KeywordRow> = sqlx::query_as(
        r#"
        SELECT * FROM keywords
        WHERE ($1::uuid IS NULL OR city_id = $1)
        ORDER BY keyword
        "#,
    )
    .bind(params.city_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(keywords))
}
