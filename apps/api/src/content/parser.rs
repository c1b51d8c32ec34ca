//! Parses the generation service's free-text reply into a structured
//! content record.
//!
//! The model is asked for bare JSON but routinely wraps it in prose or
//! markdown code fences, so the parser takes the substring from the first
//! `{` to the last `}` and parses that. Missing `questions`/`keywords`
//! default to empty; a missing `title`, `metaDescription`, or `content`
//! is an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::research::QuestionAnswer;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in generation reply")]
    MissingJson,

    #[error("generation reply JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structured content extracted from one generation reply, plus derived
/// metrics. `word_count` counts whitespace-delimited tokens of `content`
/// after stripping markup tags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub meta_description: String,
    pub content: String,
    pub questions: Vec<QuestionAnswer>,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub questions_count: usize,
}

/// The reply shape the prompt demands. Lenient on the list fields only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    title: String,
    meta_description: String,
    content: String,
    #[serde(default)]
    questions: Vec<QuestionAnswer>,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Parses a raw generation reply into a `GeneratedContent`.
pub fn parse_content_reply(reply: &str) -> Result<GeneratedContent, ParseError> {
    let json = extract_json_object(reply).ok_or(ParseError::MissingJson)?;
    let raw: RawContent = serde_json::from_str(json)?;

    let word_count = count_words(&raw.content);
    let questions_count = raw.questions.len();

    Ok(GeneratedContent {
        title: raw.title,
        meta_description: raw.meta_description,
        content: raw.content,
        questions: raw.questions,
        keywords: raw.keywords,
        word_count,
        questions_count,
    })
}

/// Returns the substring spanning the first `{` through the last `}`,
/// tolerating explanatory prose or code fences around it.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

/// Counts whitespace-delimited words in HTML content, ignoring tags.
fn count_words(html: &str) -> usize {
    strip_html_tags(html).split_whitespace().count()
}

/// Replaces `<...>` tag spans with spaces so adjacent words stay separated.
fn strip_html_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED_REPLY: &str = r#"Here is the content you asked for:
```json
{"title":"T","metaDescription":"D","content":"<p>a b c</p>","questions":[{"question":"Q","answer":"A"}],"keywords":["k"]}
```
Let me know if you need revisions."#;

    #[test]
    fn test_parses_fenced_reply_with_surrounding_prose() {
        let content = parse_content_reply(FENCED_REPLY).unwrap();
        assert_eq!(content.title, "T");
        assert_eq!(content.meta_description, "D");
        assert_eq!(content.word_count, 3);
        assert_eq!(content.questions_count, 1);
        assert_eq!(content.keywords, vec!["k".to_string()]);
        assert_eq!(content.questions[0].question, "Q");
    }

    #[test]
    fn test_reply_without_json_object_is_an_error() {
        let err = parse_content_reply("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, ParseError::MissingJson));
    }

    #[test]
    fn test_missing_questions_and_keywords_default_to_empty() {
        let reply = r#"{"title":"T","metaDescription":"D","content":"body"}"#;
        let content = parse_content_reply(reply).unwrap();
        assert!(content.questions.is_empty());
        assert!(content.keywords.is_empty());
        assert_eq!(content.questions_count, 0);
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let reply = r#"{"metaDescription":"D","content":"body"}"#;
        let err = parse_content_reply(reply).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_nested_braces_inside_content_survive_extraction() {
        let reply = r#"note {"title":"T","metaDescription":"D","content":"a {b} c"} done"#;
        let content = parse_content_reply(reply).unwrap();
        assert_eq!(content.content, "a {b} c");
    }

    #[test]
    fn test_count_words_strips_tags_and_collapses_whitespace() {
        assert_eq!(count_words("<h2>Pricing</h2><p>by  the\nton</p>"), 4);
        assert_eq!(count_words("<p></p>"), 0);
        assert_eq!(count_words(""), 0);
    }
}
