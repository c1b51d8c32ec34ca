//! Prompt templates for SEO content generation.
//!
//! A prompt is the fixed role/context preamble (location, targets, required
//! JSON reply shape) followed by one page-type-specific instruction block.

use crate::content::generator::ContentRequest;
use crate::models::research::PageType;

/// Content rules and the required reply shape, shared by every page type.
/// The JSON field names here are load-bearing: the parser expects them.
const CONTENT_REQUIREMENTS: &str = r#"CONTENT REQUIREMENTS:
1. Write naturally and conversationally while maintaining professionalism
2. Include specific local references (streets, landmarks, neighborhoods)
3. Answer real customer questions comprehensively
4. Include pricing guidance and permit information
5. Use semantic SEO - naturally include related terms and concepts
6. Structure content with clear headings (H2, H3)
7. Write for featured snippets (direct answers, tables, lists)
8. Include actionable advice and practical tips

RESPONSE FORMAT (JSON):
{
  "title": "SEO-optimized page title with primary keyword",
  "metaDescription": "Compelling 155-character meta description with CTA",
  "content": "Full HTML content with proper heading structure",
  "questions": [
    {
      "question": "Question text",
      "answer": "Detailed answer (200-400 words)"
    }
  ],
  "keywords": ["primary keyword", "semantic keyword 1", "semantic keyword 2", ...]
}
"#;

const MAIN_CITY_FOCUS: &str = r#"MAIN CITY PAGE FOCUS:
- Primary keyword: "dumpster rental [city]"
- Cover ALL aspects: residential, commercial, construction, roofing
- Include comprehensive pricing guide (by size)
- Detail permit requirements and regulations
- List major neighborhoods served
- Include local dump/transfer station information
- Add section on delivery areas and restrictions
- Include real customer reviews/testimonials structure
- Cover dumpster sizes (10, 20, 30, 40 yard) in detail

EXAMPLE QUESTIONS TO ANSWER:
- How much does it cost to rent a dumpster in [city]?
- What size dumpster do I need for [project type]?
- Do I need a permit for a dumpster in [city]?
- How long can I keep the dumpster?
- What can't I put in a dumpster?
- Same-day dumpster rental options
- Weight limits and overage charges
"#;

/// Replace `{topic}` and `{topic_upper}` before sending.
const TOPIC_FOCUS_TEMPLATE: &str = r#"TOPIC PAGE FOCUS ({topic}):
- Target keyword: "{topic} dumpster rental [city]"
- Deep dive into this specific use case
- Include project-specific advice
- Detail typical project timelines
- List what materials are commonly disposed
- Provide size recommendations for this project type
- Include cost breakdowns specific to {topic}
- Add safety considerations
- Include local regulations specific to {topic} projects

EXAMPLE QUESTIONS FOR {topic_upper}:
- What size dumpster for {topic} project?
- How much does {topic} dumpster rental cost?
- What can I throw away from {topic}?
- {topic} dumpster rental tips
- Best practices for {topic} waste disposal
"#;

/// Replace `{neighborhood}` and `{neighborhood_upper}` before sending.
const NEIGHBORHOOD_FOCUS_TEMPLATE: &str = r#"NEIGHBORHOOD PAGE FOCUS ({neighborhood}):
- Target keyword: "dumpster rental {neighborhood}"
- Hyper-local content with specific street names
- Mention local landmarks near {neighborhood}
- Include {neighborhood}-specific delivery considerations
- Detail permit requirements for {neighborhood}
- Discuss HOA considerations if applicable
- Include parking/placement tips for {neighborhood} streets
- Mention nearby dump locations
- Include {neighborhood} demographics context

EXAMPLE QUESTIONS FOR {neighborhood_upper}:
- Dumpster rental delivery to {neighborhood}
- Parking requirements in {neighborhood}
- Best dumpster sizes for {neighborhood} homes
- {neighborhood} permit information
- HOA rules in {neighborhood}
"#;

/// Builds the full generation prompt for one content request.
pub fn build_content_prompt(request: &ContentRequest) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You are an expert SEO content writer specializing in local service businesses.\n\
         Generate comprehensive, engaging, and SEO-optimized content for a dumpster rental business.\n\n",
    );
    prompt.push_str(&format!(
        "TARGET LOCATION: {}, {}\n",
        request.city, request.state
    ));
    prompt.push_str(&format!("PAGE TYPE: {}\n", request.page_type.as_str()));
    if let Some(topic) = &request.topic {
        prompt.push_str(&format!("TOPIC: {topic}\n"));
    }
    if let Some(neighborhood) = &request.neighborhood {
        prompt.push_str(&format!("NEIGHBORHOOD: {neighborhood}\n"));
    }
    prompt.push_str(&format!(
        "TARGET WORD COUNT: {} words\n",
        request.target_word_count
    ));
    prompt.push_str(&format!(
        "TARGET QUESTIONS: {} questions\n\n",
        request.target_question_count
    ));

    prompt.push_str(CONTENT_REQUIREMENTS);
    prompt.push('\n');
    prompt.push_str(&page_type_instructions(request));

    prompt
}

/// The page-type-specific instruction block, with topic/neighborhood
/// injected where the template calls for them.
fn page_type_instructions(request: &ContentRequest) -> String {
    match request.page_type {
        PageType::MainCity => MAIN_CITY_FOCUS.to_string(),
        PageType::Topic => {
            let topic = request.topic.as_deref().unwrap_or_default();
            TOPIC_FOCUS_TEMPLATE
                .replace("{topic_upper}", &topic.to_uppercase())
                .replace("{topic}", topic)
        }
        PageType::Neighborhood => {
            let neighborhood = request.neighborhood.as_deref().unwrap_or_default();
            NEIGHBORHOOD_FOCUS_TEMPLATE
                .replace("{neighborhood_upper}", &neighborhood.to_uppercase())
                .replace("{neighborhood}", neighborhood)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page_type: PageType) -> ContentRequest {
        ContentRequest {
            city: "Austin".to_string(),
            state: "Texas".to_string(),
            page_type,
            topic: None,
            neighborhood: None,
            target_word_count: 8500,
            target_question_count: 45,
        }
    }

    #[test]
    fn test_prompt_contains_location_and_targets() {
        let prompt = build_content_prompt(&request(PageType::MainCity));
        assert!(prompt.contains("TARGET LOCATION: Austin, Texas"));
        assert!(prompt.contains("TARGET WORD COUNT: 8500 words"));
        assert!(prompt.contains("TARGET QUESTIONS: 45 questions"));
        assert!(prompt.contains("PAGE TYPE: main_city"));
    }

    #[test]
    fn test_prompt_states_required_reply_shape() {
        let prompt = build_content_prompt(&request(PageType::MainCity));
        assert!(prompt.contains("RESPONSE FORMAT (JSON)"));
        assert!(prompt.contains("\"metaDescription\""));
        assert!(prompt.contains("\"questions\""));
        assert!(prompt.contains("\"keywords\""));
    }

    #[test]
    fn test_main_city_prompt_uses_main_city_block() {
        let prompt = build_content_prompt(&request(PageType::MainCity));
        assert!(prompt.contains("MAIN CITY PAGE FOCUS"));
        assert!(!prompt.contains("TOPIC PAGE FOCUS"));
    }

    #[test]
    fn test_topic_prompt_injects_topic() {
        let mut req = request(PageType::Topic);
        req.topic = Some("roofing".to_string());
        let prompt = build_content_prompt(&req);
        assert!(prompt.contains("TOPIC PAGE FOCUS (roofing)"));
        assert!(prompt.contains("EXAMPLE QUESTIONS FOR ROOFING"));
        assert!(prompt.contains("TOPIC: roofing\n"));
    }

    #[test]
    fn test_neighborhood_prompt_injects_neighborhood() {
        let mut req = request(PageType::Neighborhood);
        req.neighborhood = Some("Hyde Park".to_string());
        let prompt = build_content_prompt(&req);
        assert!(prompt.contains("NEIGHBORHOOD PAGE FOCUS (Hyde Park)"));
        assert!(prompt.contains("EXAMPLE QUESTIONS FOR HYDE PARK"));
        assert!(prompt.contains("NEIGHBORHOOD: Hyde Park\n"));
    }

    #[test]
    fn test_optional_lines_omitted_when_absent() {
        let prompt = build_content_prompt(&request(PageType::MainCity));
        assert!(!prompt.contains("TOPIC:"));
        assert!(!prompt.contains("NEIGHBORHOOD:"));
    }
}
