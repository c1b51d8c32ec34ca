use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Page depth tier. Drives the instruction template and the word/question
/// targets of a research job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    MainCity,
    Topic,
    Neighborhood,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::MainCity => "main_city",
            PageType::Topic => "topic",
            PageType::Neighborhood => "neighborhood",
        }
    }
}

/// A content research job.
///
/// Rows are inserted with status `processing` and updated exactly once to
/// `completed` or `failed`. `results_json` is set iff the job completed;
/// `error_message` only when it failed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResearchJobRow {
    pub id: Uuid,
    pub city_id: Uuid,
    pub page_type: String,
    pub topic: Option<String>,
    pub neighborhood: Option<String>,
    pub status: String,
    pub results_json: Option<Value>,
    pub word_count: Option<i32>,
    pub questions_count: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Research job joined with its city, as returned by the list endpoint.
/// The (potentially large) results payload is deliberately not included.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResearchJobListRow {
    pub id: Uuid,
    pub city_id: Uuid,
    pub page_type: String,
    pub topic: Option<String>,
    pub neighborhood: Option<String>,
    pub status: String,
    pub word_count: Option<i32>,
    pub questions_count: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub city: String,
    pub state: String,
    pub state_abbr: String,
}

/// One generated question/answer pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// The payload persisted to `research_jobs.results_json` when a job
/// completes, and read back at publish time. Keys are camelCase for
/// compatibility with the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResults {
    pub title: String,
    pub meta_description: String,
    pub content: String,
    #[serde(default)]
    pub questions: Vec<QuestionAnswer>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_serde_round_trip() {
        let page_type: PageType = serde_json::from_str(r#""main_city""#).unwrap();
        assert_eq!(page_type, PageType::MainCity);
        assert_eq!(
            serde_json::to_string(&PageType::Neighborhood).unwrap(),
            r#""neighborhood""#
        );
    }

    #[test]
    fn test_research_results_defaults_missing_lists() {
        let json = r#"{
            "title": "T",
            "metaDescription": "D",
            "content": "<p>body</p>"
        }"#;
        let results: ResearchResults = serde_json::from_str(json).unwrap();
        assert!(results.questions.is_empty());
        assert!(results.keywords.is_empty());
    }

    #[test]
    fn test_research_results_uses_camel_case_keys() {
        let results = ResearchResults {
            title: "T".to_string(),
            meta_description: "D".to_string(),
            content: "c".to_string(),
            questions: vec![],
            keywords: vec!["k".to_string()],
        };
        let value = serde_json::to_value(&results).unwrap();
        assert!(value.get("metaDescription").is_some());
        assert!(value.get("meta_description").is_none());
    }
}
