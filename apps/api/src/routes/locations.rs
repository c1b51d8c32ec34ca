use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::location::GeoLocationRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub county: Option<String>,
    pub population: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip_codes: Option<Vec<String>>,
    pub priority_rank: Option<i32>,
}

/// GET /api/v1/locations
pub async fn handle_list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<GeoLocationRow>>, AppError> {
    let locations: Vec<GeoLocationRow> =
        sqlx::query_as("SELECT * FROM geo_locations ORDER BY priority_rank NULLS LAST, city")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(locations))
}

/// POST /api/v1/locations
pub async fn handle_create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<GeoLocationRow>), AppError> {
    if request.city.trim().is_empty() || request.state_abbr.trim().is_empty() {
        return Err(AppError::Validation(
            "city and stateAbbr must be non-empty".to_string(),
        ));
    }

    let location: GeoLocationRow = sqlx::query_as(
        r#"
        INSERT INTO geo_locations
            (city, state, state_abbr, county, population, latitude, longitude,
             zip_codes, priority_rank)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.state_abbr)
    .bind(&request.county)
    .bind(request.population)
    .bind(request.latitude)
    .bind(request.longitude)
    .bind(&request.zip_codes)
    .bind(request.priority_rank)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(location)))
}
