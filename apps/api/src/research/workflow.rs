//! Research job workflow.
//!
//! Flow: validate request → load city → insert job (`processing`) →
//! resolve targets → generate → enrich with schema markup → update job to
//! `completed`, or to `failed` with the error message. Exactly one insert
//! and one update per invocation; nothing is persisted mid-generation.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::content::generator::{generate_content, ContentRequest};
use crate::content::parser::GeneratedContent;
use crate::errors::AppError;
use crate::models::location::GeoLocationRow;
use crate::models::research::{PageType, ResearchJobRow, ResearchResults};
use crate::seo::schema::{
    faq_schema, local_business_schema, GeoCoordinates, LocalBusinessParams, PostalAddress,
};
use crate::seo::slug::generate_slug;
use crate::state::AppState;

// Business profile placeholders; the dashboard does not yet store a real
// street address, so LocalBusiness markup carries these until it does.
const BUSINESS_STREET_ADDRESS: &str = "123 Main St";
const BUSINESS_POSTAL_CODE: &str = "00000";
const PUBLIC_SITE_BASE: &str = "https://example.com";

/// Word and question targets per page depth tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTargets {
    pub words: u32,
    pub questions: u32,
}

impl ContentTargets {
    /// Resolves targets for a page type string; anything unrecognized gets
    /// the full main-city depth.
    pub fn for_page_type(page_type: &str) -> Self {
        match page_type {
            "topic" => ContentTargets {
                words: 5000,
                questions: 25,
            },
            "neighborhood" => ContentTargets {
                words: 3500,
                questions: 18,
            },
            _ => ContentTargets {
                words: 8500,
                questions: 45,
            },
        }
    }
}

/// Body of `POST /api/v1/research`. Presence of `cityId` and `pageType` is
/// validated by the workflow so the caller gets a uniform error shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResearchRequest {
    pub city_id: Option<Uuid>,
    pub page_type: Option<PageType>,
    pub topic: Option<String>,
    pub neighborhood: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub status: String,
    pub word_count: usize,
    pub questions_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchJobResponse {
    pub success: bool,
    pub job: JobSummary,
    pub content: GeneratedContent,
}

/// Runs one research job end to end.
pub async fn run_research_job(
    state: &AppState,
    request: CreateResearchRequest,
) -> Result<ResearchJobResponse, AppError> {
    let city_id = request
        .city_id
        .ok_or_else(|| AppError::Validation("Missing required field: cityId".to_string()))?;
    let page_type = request
        .page_type
        .ok_or_else(|| AppError::Validation("Missing required field: pageType".to_string()))?;

    let location: Option<GeoLocationRow> = sqlx::query_as("SELECT * FROM geo_locations WHERE id = $1")
        .bind(city_id)
        .fetch_optional(&state.db)
        .await?;
    let location =
        location.ok_or_else(|| AppError::NotFound(format!("City {city_id} not found")))?;

    // The job is observable as `processing` from here until the terminal update.
    let job: ResearchJobRow = sqlx::query_as(
        r#"
        INSERT INTO research_jobs (city_id, page_type, topic, neighborhood, status)
        VALUES ($1, $2, $3, $4, 'processing')
        RETURNING *
        "#,
    )
    .bind(city_id)
    .bind(page_type.as_str())
    .bind(&request.topic)
    .bind(&request.neighborhood)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Created research job {} ({}) for {}, {}",
        job.id,
        page_type.as_str(),
        location.city,
        location.state
    );

    let targets = ContentTargets::for_page_type(page_type.as_str());
    let content_request = ContentRequest {
        city: location.city.clone(),
        state: location.state.clone(),
        page_type,
        topic: request.topic,
        neighborhood: request.neighborhood,
        target_word_count: targets.words,
        target_question_count: targets.questions,
    };

    match generate_and_complete(state, &job, &location, &content_request).await {
        Ok(response) => Ok(response),
        Err(e) => {
            mark_failed(&state.db, job.id, &e).await;
            Err(e)
        }
    }
}

/// The failable span of the workflow: generation, enrichment, and the
/// terminal `completed` update.
async fn generate_and_complete(
    state: &AppState,
    job: &ResearchJobRow,
    location: &GeoLocationRow,
    request: &ContentRequest,
) -> Result<ResearchJobResponse, AppError> {
    let content = generate_content(&state.llm, request).await?;

    // Trailing structured-data markup rides along inside the page body.
    let faq = faq_schema(&content.questions);
    let business = local_business_schema(&LocalBusinessParams {
        name: format!("Dumpster Rental {}", location.city),
        description: content.meta_description.clone(),
        address: PostalAddress {
            street_address: BUSINESS_STREET_ADDRESS.to_string(),
            locality: location.city.clone(),
            region: location.state_abbr.clone(),
            postal_code: BUSINESS_POSTAL_CODE.to_string(),
            country: "US".to_string(),
        },
        geo: match (location.latitude, location.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoCoordinates {
                latitude,
                longitude,
            }),
            _ => None,
        },
        telephone: None,
        url: format!(
            "{}/{}",
            PUBLIC_SITE_BASE,
            generate_slug([&location.city, &location.state_abbr])
        ),
        price_range: None,
        area_served: None,
    });
    let enhanced_content = format!("{}\n{}\n{}", content.content, faq, business);

    let results = ResearchResults {
        title: content.title.clone(),
        meta_description: content.meta_description.clone(),
        content: enhanced_content,
        questions: content.questions.clone(),
        keywords: content.keywords.clone(),
    };
    let results_json = serde_json::to_value(&results).map_err(anyhow::Error::from)?;

    sqlx::query(
        r#"
        UPDATE research_jobs
        SET status = 'completed', results_json = $1, word_count = $2,
            questions_count = $3, completed_at = now(), updated_at = now()
        WHERE id = $4
        "#,
    )
    .bind(results_json)
    .bind(content.word_count as i32)
    .bind(content.questions_count as i32)
    .bind(job.id)
    .execute(&state.db)
    .await?;

    info!(
        "Research job {} completed: {} words, {} questions",
        job.id, content.word_count, content.questions_count
    );

    Ok(ResearchJobResponse {
        success: true,
        job: JobSummary {
            id: job.id,
            status: "completed".to_string(),
            word_count: content.word_count,
            questions_count: content.questions_count,
        },
        content,
    })
}

/// Records a terminal failure on the job row. The original error is what
/// the caller needs to see, so a failing bookkeeping write is only logged.
async fn mark_failed(pool: &PgPool, job_id: Uuid, error: &AppError) {
    if let Err(db_err) = sqlx::query(
        "UPDATE research_jobs SET status = 'failed', error_message = $1, updated_at = now() WHERE id = $2",
    )
    .bind(error.to_string())
    .bind(job_id)
    .execute(pool)
    .await
    {
        warn!("Failed to record error on research job {job_id}: {db_err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_per_page_type() {
        assert_eq!(
            ContentTargets::for_page_type("main_city"),
            ContentTargets {
                words: 8500,
                questions: 45
            }
        );
        assert_eq!(
            ContentTargets::for_page_type("topic"),
            ContentTargets {
                words: 5000,
                questions: 25
            }
        );
        assert_eq!(
            ContentTargets::for_page_type("neighborhood"),
            ContentTargets {
                words: 3500,
                questions: 18
            }
        );
    }

    #[test]
    fn test_unknown_page_type_gets_main_city_depth() {
        assert_eq!(
            ContentTargets::for_page_type("landing"),
            ContentTargets::for_page_type("main_city")
        );
    }

    #[test]
    fn test_request_validation_field_names_are_camel_case() {
        let request: CreateResearchRequest =
            serde_json::from_str(r#"{"cityId":"8f8c0a9e-3b1a-4f6e-9d7b-0a1b2c3d4e5f","pageType":"topic","topic":"roofing"}"#)
                .unwrap();
        assert_eq!(request.page_type, Some(PageType::Topic));
        assert_eq!(request.topic.as_deref(), Some("roofing"));
    }
}
