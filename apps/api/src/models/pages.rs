use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Bookkeeping record for a page that was pushed to WordPress.
/// Created only after a successful publish call; `parent_post_id` encodes
/// the city → topic/neighborhood page hierarchy on the WordPress side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WordpressPageRow {
    pub id: Uuid,
    pub city_id: Uuid,
    pub research_job_id: Option<Uuid>,
    pub wp_post_id: i64,
    pub url: String,
    pub page_type: String,
    pub topic: Option<String>,
    pub neighborhood: Option<String>,
    pub title: String,
    pub slug: String,
    pub parent_post_id: Option<i64>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
