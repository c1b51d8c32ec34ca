//! Glue for one generation pass: build the prompt, make the single
//! generation call, parse the reply.

use tracing::debug;

use crate::content::parser::{parse_content_reply, GeneratedContent};
use crate::content::prompts::build_content_prompt;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::research::PageType;

/// Inputs for one content generation call.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub city: String,
    pub state: String,
    pub page_type: PageType,
    pub topic: Option<String>,
    pub neighborhood: Option<String>,
    pub target_word_count: u32,
    pub target_question_count: u32,
}

/// Generates SEO content for one location/page-type combination.
/// Pure transformation on both sides of a single network call.
pub async fn generate_content(
    llm: &LlmClient,
    request: &ContentRequest,
) -> Result<GeneratedContent, AppError> {
    let prompt = build_content_prompt(request);
    debug!(
        "Built generation prompt ({} chars) for {}, {} ({})",
        prompt.len(),
        request.city,
        request.state,
        request.page_type.as_str()
    );

    let reply = llm.complete(&prompt).await?;
    Ok(parse_content_reply(&reply)?)
}
