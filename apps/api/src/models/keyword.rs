use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked ranking keyword for a city. Managed independently of the
/// research/publish workflows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeywordRow {
    pub id: Uuid,
    pub city_id: Uuid,
    pub keyword: String,
    pub search_volume: Option<i32>,
    pub difficulty: Option<i32>,
    pub current_rank: Option<i32>,
    pub target_rank: i32,
    pub target_url: Option<String>,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
