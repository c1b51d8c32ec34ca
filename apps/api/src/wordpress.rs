//! WordPress REST client.
//!
//! Wraps the `wp-json/wp/v2` pages/categories/tags resources with
//! application-password basic auth. Lookup operations (`get_page`,
//! `get_page_by_slug`) map a missing page to `Ok(None)`; every other
//! failure surfaces as `WordPressError` carrying the upstream message.

#![allow(dead_code)]

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

const API_PATH: &str = "/wp-json/wp/v2";

#[derive(Debug, Error)]
pub enum WordPressError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WordPress API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("page task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub site_url: String,
    pub username: String,
    pub app_password: String,
}

/// A page as returned by the WordPress REST API (subset of fields we use).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPressPage {
    pub id: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    pub slug: String,
    pub status: String,
    pub link: String,
    pub title: RenderedField,
    #[serde(default)]
    pub content: Option<RenderedField>,
    #[serde(default)]
    pub excerpt: Option<RenderedField>,
    #[serde(default)]
    pub parent: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedField {
    pub rendered: String,
}

/// A category or tag term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePageParams {
    pub title: String,
    pub content: String,
    pub slug: String,
    /// `publish`, `draft`, or `pending`; defaults to `draft`.
    pub status: Option<String>,
    pub parent_id: Option<u64>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<u64>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
}

/// Partial update: only the provided fields are sent.
#[derive(Debug, Clone, Default)]
pub struct UpdatePageParams {
    pub id: u64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub parent_id: Option<u64>,
    pub excerpt: Option<String>,
    pub featured_image: Option<u64>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
}

#[derive(Debug, Clone)]
pub struct PageHierarchy {
    pub parent: WordPressPage,
    pub children: Vec<WordPressPage>,
}

/// Outcome of a client-level bulk publish: ids partitioned by result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkPublishOutcome {
    pub success: Vec<u64>,
    pub failed: Vec<u64>,
}

/// WordPress REST error envelope.
#[derive(Debug, Deserialize)]
struct WpErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct WordPressClient {
    client: Client,
    base_url: String,
    username: String,
    app_password: String,
}

impl WordPressClient {
    pub fn new(config: WordPressConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: format!("{}{}", normalize_site_url(&config.site_url), API_PATH),
            username: config.username,
            app_password: config.app_password,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.app_password))
    }

    /// Creates a new page.
    pub async fn create_page(
        &self,
        params: &CreatePageParams,
    ) -> Result<WordPressPage, WordPressError> {
        let response = self
            .request(Method::POST, "/pages")
            .json(&create_page_body(params))
            .send()
            .await?;
        decode(response).await
    }

    /// Updates an existing page with the provided fields only.
    pub async fn update_page(
        &self,
        params: &UpdatePageParams,
    ) -> Result<WordPressPage, WordPressError> {
        let response = self
            .request(Method::POST, &format!("/pages/{}", params.id))
            .json(&update_page_body(params))
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches a page by id. A 404 is not an error.
    pub async fn get_page(&self, id: u64) -> Result<Option<WordPressPage>, WordPressError> {
        let response = self
            .request(Method::GET, &format!("/pages/{id}"))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// Fetches a page by slug. No match is not an error.
    pub async fn get_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<WordPressPage>, WordPressError> {
        let response = self
            .request(Method::GET, "/pages")
            .query(&[("slug", slug)])
            .send()
            .await?;
        let pages: Vec<WordPressPage> = decode(response).await?;
        Ok(pages.into_iter().next())
    }

    /// Deletes a page; `force` skips the trash.
    pub async fn delete_page(&self, id: u64, force: bool) -> Result<(), WordPressError> {
        let response = self
            .request(Method::DELETE, &format!("/pages/{id}"))
            .query(&[("force", force)])
            .send()
            .await?;
        decode::<Value>(response).await.map(|_| ())
    }

    /// Publishes a draft page (update with status=publish).
    pub async fn publish_page(&self, id: u64) -> Result<WordPressPage, WordPressError> {
        self.update_page(&UpdatePageParams {
            id,
            status: Some("publish".to_string()),
            ..Default::default()
        })
        .await
    }

    /// Creates a parent page, then all children concurrently with their
    /// `parent` set to the new parent's id. A failing child does not cancel
    /// its siblings; the first child error (if any) is returned after all
    /// children have settled.
    pub async fn create_page_hierarchy(
        &self,
        parent: CreatePageParams,
        children: Vec<CreatePageParams>,
    ) -> Result<PageHierarchy, WordPressError> {
        let parent_page = self.create_page(&parent).await?;

        let mut handles = Vec::with_capacity(children.len());
        for child in children {
            let client = self.clone();
            let parent_id = parent_page.id;
            handles.push(tokio::spawn(async move {
                let params = CreatePageParams {
                    parent_id: Some(parent_id),
                    ..child
                };
                client.create_page(&params).await
            }));
        }

        let mut created = Vec::with_capacity(handles.len());
        let mut first_error: Option<WordPressError> = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(page)) => created.push(page),
                Ok(Err(e)) => {
                    warn!("Child page create failed: {e}");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    warn!("Child page create task failed: {e}");
                    first_error.get_or_insert(WordPressError::Task(e));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(PageHierarchy {
                parent: parent_page,
                children: created,
            }),
        }
    }

    /// Attempts to publish each page concurrently, partitioning ids into
    /// success/failed without aborting on individual failures.
    pub async fn bulk_publish(&self, page_ids: &[u64]) -> BulkPublishOutcome {
        let mut handles = Vec::with_capacity(page_ids.len());
        for &id in page_ids {
            let client = self.clone();
            handles.push((id, tokio::spawn(async move { client.publish_page(id).await })));
        }

        let mut outcome = BulkPublishOutcome::default();
        for (id, handle) in handles {
            match handle.await {
                Ok(Ok(_)) => outcome.success.push(id),
                Ok(Err(e)) => {
                    warn!("Bulk publish of page {id} failed: {e}");
                    outcome.failed.push(id);
                }
                Err(e) => {
                    warn!("Bulk publish task for page {id} failed: {e}");
                    outcome.failed.push(id);
                }
            }
        }
        outcome
    }

    /// Health probe against the API root. Never errors.
    pub async fn test_connection(&self) -> bool {
        match self.request(Method::GET, "/").send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("WordPress connection test failed: {e}");
                false
            }
        }
    }

    pub async fn get_categories(&self) -> Result<Vec<Term>, WordPressError> {
        let response = self
            .request(Method::GET, "/categories")
            .query(&[("per_page", "100")])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Term, WordPressError> {
        let response = self
            .request(Method::POST, "/categories")
            .json(&json!({
                "name": name,
                "description": description.unwrap_or_default(),
            }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_tags(&self) -> Result<Vec<Term>, WordPressError> {
        let response = self
            .request(Method::GET, "/tags")
            .query(&[("per_page", "100")])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_tag(&self, name: &str) -> Result<Term, WordPressError> {
        let response = self
            .request(Method::POST, "/tags")
            .json(&json!({ "name": name }))
            .send()
            .await?;
        decode(response).await
    }
}

/// Decodes a response body, converting non-2xx statuses into
/// `WordPressError::Api` with the upstream message when one is present.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, WordPressError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<WpErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(WordPressError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

fn normalize_site_url(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

fn create_page_body(params: &CreatePageParams) -> Value {
    let mut body = json!({
        "title": params.title,
        "content": params.content,
        "slug": params.slug,
        "status": params.status.as_deref().unwrap_or("draft"),
        "parent": params.parent_id.unwrap_or(0),
        "excerpt": params.excerpt.clone().unwrap_or_default(),
        "categories": params.categories.clone().unwrap_or_default(),
        "tags": params.tags.clone().unwrap_or_default(),
        "featured_media": params.featured_image.unwrap_or(0),
    });

    // Yoast SEO meta, honored when the Yoast plugin is installed
    if params.meta_description.is_some() || params.focus_keyword.is_some() {
        body["yoast_head_json"] = json!({
            "description": params.meta_description,
            "focus_keyword": params.focus_keyword,
        });
    }

    body
}

fn update_page_body(params: &UpdatePageParams) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(title) = &params.title {
        body.insert("title".to_string(), json!(title));
    }
    if let Some(content) = &params.content {
        body.insert("content".to_string(), json!(content));
    }
    if let Some(slug) = &params.slug {
        body.insert("slug".to_string(), json!(slug));
    }
    if let Some(status) = &params.status {
        body.insert("status".to_string(), json!(status));
    }
    if let Some(parent_id) = params.parent_id {
        body.insert("parent".to_string(), json!(parent_id));
    }
    if let Some(excerpt) = &params.excerpt {
        body.insert("excerpt".to_string(), json!(excerpt));
    }
    if let Some(featured_image) = params.featured_image {
        body.insert("featured_media".to_string(), json!(featured_image));
    }
    if let Some(categories) = &params.categories {
        body.insert("categories".to_string(), json!(categories));
    }
    if let Some(tags) = &params.tags {
        body.insert("tags".to_string(), json!(tags));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_site_url_trims_trailing_slash() {
        assert_eq!(
            normalize_site_url("https://example.com/"),
            "https://example.com"
        );
        assert_eq!(
            normalize_site_url("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_create_body_defaults() {
        let body = create_page_body(&CreatePageParams {
            title: "T".to_string(),
            content: "c".to_string(),
            slug: "t".to_string(),
            ..Default::default()
        });
        assert_eq!(body["status"], "draft");
        assert_eq!(body["parent"], 0);
        assert_eq!(body["excerpt"], "");
        assert!(body.get("yoast_head_json").is_none());
    }

    #[test]
    fn test_create_body_includes_yoast_meta_when_present() {
        let body = create_page_body(&CreatePageParams {
            title: "T".to_string(),
            content: "c".to_string(),
            slug: "t".to_string(),
            status: Some("publish".to_string()),
            meta_description: Some("desc".to_string()),
            focus_keyword: Some("kw".to_string()),
            ..Default::default()
        });
        assert_eq!(body["status"], "publish");
        assert_eq!(body["yoast_head_json"]["description"], "desc");
        assert_eq!(body["yoast_head_json"]["focus_keyword"], "kw");
    }

    #[test]
    fn test_update_body_sends_only_provided_fields() {
        let body = update_page_body(&UpdatePageParams {
            id: 7,
            status: Some("publish".to_string()),
            ..Default::default()
        });
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(body["status"], "publish");
    }

    #[test]
    fn test_page_deserializes_from_rest_shape() {
        let json = r#"{
            "id": 42,
            "date": "2025-01-01T00:00:00",
            "slug": "austin-tx",
            "status": "publish",
            "link": "https://example.com/austin-tx",
            "title": {"rendered": "Austin"},
            "content": {"rendered": "<p>body</p>", "protected": false},
            "parent": 0
        }"#;
        let page: WordPressPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.id, 42);
        assert_eq!(page.title.rendered, "Austin");
        assert!(page.excerpt.is_none());
    }
}
