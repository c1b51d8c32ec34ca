use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A target city. Reference data managed by the operator; read by every
/// workflow but never written by one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeoLocationRow {
    pub id: Uuid,
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub county: Option<String>,
    pub population: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip_codes: Option<Vec<String>>,
    pub priority_rank: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
