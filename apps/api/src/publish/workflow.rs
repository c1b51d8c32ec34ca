//! Publish workflow.
//!
//! Single publish: precondition checks (job exists, completed, has results)
//! → slug + parent resolution → WordPress create → bookkeeping insert.
//! A bookkeeping failure after a successful create is downgraded to a
//! warning: the page is live and must not be reported as failed.
//!
//! Bulk publish runs the single workflow sequentially, paced by a
//! `RateLimiter` to stay under the WordPress API's rate limit. It never
//! aborts early; failures are captured per item.

use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::location::GeoLocationRow;
use crate::models::pages::WordpressPageRow;
use crate::models::research::{PageType, ResearchJobRow, ResearchResults};
use crate::publish::limiter::RateLimiter;
use crate::seo::slug::generate_slug;
use crate::state::AppState;
use crate::wordpress::{CreatePageParams, WordPressPage};

const BULK_PUBLISH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub wp_page: WordPressPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_record: Option<WordpressPageRow>,
}

#[derive(Debug, Default, Serialize)]
pub struct BulkPublishResults {
    pub success: Vec<Uuid>,
    pub failed: Vec<BulkItemFailure>,
}

#[derive(Debug, Serialize)]
pub struct BulkItemFailure {
    pub id: Uuid,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct BulkPublishSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct BulkPublishResponse {
    pub success: bool,
    pub results: BulkPublishResults,
    pub summary: BulkPublishSummary,
}

impl BulkPublishResults {
    pub fn summary(&self, total: usize) -> BulkPublishSummary {
        BulkPublishSummary {
            total,
            succeeded: self.success.len(),
            failed: self.failed.len(),
        }
    }
}

/// The slug for a research job's page: city-state plus any topic and
/// neighborhood qualifiers.
pub fn page_slug(
    city: &str,
    state_abbr: &str,
    topic: Option<&str>,
    neighborhood: Option<&str>,
) -> String {
    let mut parts = vec![city, state_abbr];
    if let Some(topic) = topic {
        parts.push(topic);
    }
    if let Some(neighborhood) = neighborhood {
        parts.push(neighborhood);
    }
    generate_slug(parts)
}

/// Publishes one completed research job to WordPress.
pub async fn publish_research_job(
    state: &AppState,
    research_job_id: Uuid,
) -> Result<PublishResponse, AppError> {
    let job: Option<ResearchJobRow> = sqlx::query_as("SELECT * FROM research_jobs WHERE id = $1")
        .bind(research_job_id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound("Research job not found".to_string()))?;

    if job.status != "completed" {
        return Err(AppError::InvalidState(
            "Research job is not completed".to_string(),
        ));
    }
    let results_json = job
        .results_json
        .clone()
        .ok_or_else(|| AppError::InvalidState("Research job has no content".to_string()))?;
    let results: ResearchResults = serde_json::from_value(results_json).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "research job {} has malformed results: {e}",
            job.id
        ))
    })?;

    let location: Option<GeoLocationRow> = sqlx::query_as("SELECT * FROM geo_locations WHERE id = $1")
        .bind(job.city_id)
        .fetch_optional(&state.db)
        .await?;
    let location =
        location.ok_or_else(|| AppError::NotFound(format!("City {} not found", job.city_id)))?;

    let slug = page_slug(
        &location.city,
        &location.state_abbr,
        job.topic.as_deref(),
        job.neighborhood.as_deref(),
    );

    // Topic and neighborhood pages hang off the city page when it exists;
    // a missing parent is not an error, the page just publishes unparented.
    let parent_id = if job.page_type != PageType::MainCity.as_str() {
        let parent_slug = generate_slug([&location.city, &location.state_abbr]);
        state
            .wordpress
            .get_page_by_slug(&parent_slug)
            .await?
            .map(|page| page.id)
    } else {
        None
    };

    let wp_page = state
        .wordpress
        .create_page(&CreatePageParams {
            title: results.title.clone(),
            content: results.content.clone(),
            slug,
            status: Some("publish".to_string()),
            parent_id,
            meta_description: Some(results.meta_description.clone()),
            focus_keyword: results.keywords.first().cloned(),
            excerpt: Some(results.meta_description.clone()),
            ..Default::default()
        })
        .await?;

    info!(
        "Published research job {} as WordPress page {} ({})",
        job.id, wp_page.id, wp_page.link
    );

    let record: Result<WordpressPageRow, sqlx::Error> = sqlx::query_as(
        r#"
        INSERT INTO wordpress_pages
            (city_id, research_job_id, wp_post_id, url, page_type, topic,
             neighborhood, title, slug, parent_post_id, status, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'publish', now())
        RETURNING *
        "#,
    )
    .bind(job.city_id)
    .bind(job.id)
    .bind(wp_page.id as i64)
    .bind(&wp_page.link)
    .bind(&job.page_type)
    .bind(&job.topic)
    .bind(&job.neighborhood)
    .bind(&results.title)
    .bind(&wp_page.slug)
    .bind(parent_id.map(|id| id as i64))
    .fetch_one(&state.db)
    .await;

    match record {
        Ok(row) => Ok(PublishResponse {
            success: true,
            warning: None,
            wp_page,
            page_record: Some(row),
        }),
        Err(e) => {
            warn!(
                "Published page {} but failed to save its record: {e}",
                wp_page.id
            );
            Ok(PublishResponse {
                success: true,
                warning: Some("Page published but record not saved".to_string()),
                wp_page,
                page_record: None,
            })
        }
    }
}

/// Publishes a batch of research jobs sequentially.
pub async fn bulk_publish_jobs(
    state: &AppState,
    research_job_ids: &[Uuid],
) -> Result<BulkPublishResponse, AppError> {
    if research_job_ids.is_empty() {
        return Err(AppError::Validation(
            "Invalid or empty researchJobIds array".to_string(),
        ));
    }

    // Spacing between items keeps the WordPress API under its rate limit.
    let mut limiter = RateLimiter::new(BULK_PUBLISH_DELAY);

    let mut results = BulkPublishResults::default();
    for &job_id in research_job_ids {
        limiter.acquire().await;
        match publish_research_job(state, job_id).await {
            Ok(_) => results.success.push(job_id),
            Err(e) => {
                warn!("Bulk publish: job {job_id} failed: {e}");
                results.failed.push(BulkItemFailure {
                    id: job_id,
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = results.summary(research_job_ids.len());
    Ok(BulkPublishResponse {
        success: true,
        results,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slug_with_qualifiers() {
        assert_eq!(page_slug("Austin", "TX", None, None), "austin-tx");
        assert_eq!(
            page_slug("Austin", "TX", Some("Kitchen Remodel"), None),
            "austin-tx-kitchen-remodel"
        );
        assert_eq!(
            page_slug("Austin", "TX", Some("roofing"), Some("Hyde Park")),
            "austin-tx-roofing-hyde-park"
        );
    }

    #[test]
    fn test_bulk_summary_counts_partition() {
        let results = BulkPublishResults {
            success: vec![Uuid::new_v4(), Uuid::new_v4()],
            failed: vec![BulkItemFailure {
                id: Uuid::new_v4(),
                error: "Research job is not completed".to_string(),
            }],
        };
        let summary = results.summary(3);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }
}
