//! schema.org structured-data fragments and meta-tag builders.
//!
//! Each formatter returns a serialized `<script type="application/ld+json">`
//! block ready to be embedded in page content. Optional fields are omitted
//! from the output, never emitted as null.

#![allow(dead_code)]

use serde_json::{json, Value};

use crate::models::research::QuestionAnswer;

#[derive(Debug, Clone)]
pub struct PostalAddress {
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct LocalBusinessParams {
    pub name: String,
    pub description: String,
    pub address: PostalAddress,
    pub geo: Option<GeoCoordinates>,
    pub telephone: Option<String>,
    pub url: String,
    pub price_range: Option<String>,
    pub area_served: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct BreadcrumbItem {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct OrganizationParams {
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub same_as: Option<Vec<String>>,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenGraphParams {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    pub og_type: Option<String>,
}

/// Generates LocalBusiness schema markup.
pub fn local_business_schema(params: &LocalBusinessParams) -> String {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "LocalBusiness",
        "name": params.name,
        "description": params.description,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": params.address.street_address,
            "addressLocality": params.address.locality,
            "addressRegion": params.address.region,
            "postalCode": params.address.postal_code,
            "addressCountry": params.address.country,
        },
        "url": params.url,
    });

    if let Some(telephone) = &params.telephone {
        schema["telephone"] = json!(telephone);
    }
    if let Some(price_range) = &params.price_range {
        schema["priceRange"] = json!(price_range);
    }
    if let Some(geo) = &params.geo {
        schema["geo"] = json!({
            "@type": "GeoCoordinates",
            "latitude": geo.latitude,
            "longitude": geo.longitude,
        });
    }
    if let Some(areas) = &params.area_served {
        schema["areaServed"] = Value::Array(
            areas
                .iter()
                .map(|area| json!({"@type": "City", "name": area}))
                .collect(),
        );
    }

    ld_json_script(&schema)
}

/// Generates FAQPage schema markup.
pub fn faq_schema(faqs: &[QuestionAnswer]) -> String {
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": faqs
            .iter()
            .map(|faq| json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            }))
            .collect::<Vec<_>>(),
    });

    ld_json_script(&schema)
}

/// Generates BreadcrumbList schema markup. Positions are 1-based.
pub fn breadcrumb_schema(items: &[BreadcrumbItem]) -> String {
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items
            .iter()
            .enumerate()
            .map(|(index, item)| json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item.name,
                "item": item.url,
            }))
            .collect::<Vec<_>>(),
    });

    ld_json_script(&schema)
}

/// Generates Organization schema markup.
pub fn organization_schema(params: &OrganizationParams) -> String {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": params.name,
        "url": params.url,
    });

    if let Some(logo) = &params.logo {
        schema["logo"] = json!(logo);
    }
    if let Some(same_as) = &params.same_as {
        schema["sameAs"] = json!(same_as);
    }
    if let Some(telephone) = &params.telephone {
        schema["telephone"] = json!(telephone);
    }
    if let Some(email) = &params.email {
        schema["email"] = json!(email);
    }

    ld_json_script(&schema)
}

/// Generates an optimized meta description from the page-type template
/// table. Unknown topics fall back to the main city template.
pub fn meta_description(city: &str, state: &str, page_type: &str, topic: Option<&str>) -> String {
    let main_city = format!(
        "Professional dumpster rental in {city}, {state}. Same-day delivery, \
         competitive pricing, all sizes available. Get your free quote today!"
    );

    if page_type != "topic" {
        return main_city;
    }

    match topic.map(|t| t.to_lowercase()).as_deref() {
        Some("residential") => format!(
            "Residential dumpster rental {city}, {state}. Perfect for home cleanouts, \
             renovations & yard waste. Easy booking, fast delivery. Call now!"
        ),
        Some("commercial") => format!(
            "Commercial dumpster services {city}, {state}. Reliable waste management \
             for businesses. Multiple sizes, flexible scheduling. Free quote!"
        ),
        Some("construction") => format!(
            "Construction dumpster rental {city}, {state}. Heavy-duty containers for \
             job sites. Quick delivery, competitive rates. Order today!"
        ),
        Some("roofing") => format!(
            "Roofing dumpster rental {city}, {state}. Specialized containers for \
             shingle disposal. Fast service, transparent pricing. Get started!"
        ),
        _ => main_city,
    }
}

/// Generates Open Graph and Twitter card meta tags. Image tags are omitted
/// when no image is provided.
pub fn open_graph_tags(params: &OpenGraphParams) -> String {
    let mut tags = String::new();
    tags.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\" />\n",
        params.title
    ));
    tags.push_str(&format!(
        "<meta property=\"og:description\" content=\"{}\" />\n",
        params.description
    ));
    tags.push_str(&format!(
        "<meta property=\"og:url\" content=\"{}\" />\n",
        params.url
    ));
    tags.push_str(&format!(
        "<meta property=\"og:type\" content=\"{}\" />\n",
        params.og_type.as_deref().unwrap_or("website")
    ));
    if let Some(image) = &params.image {
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{image}\" />\n"
        ));
    }
    tags.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\" />\n");
    tags.push_str(&format!(
        "<meta name=\"twitter:title\" content=\"{}\" />\n",
        params.title
    ));
    tags.push_str(&format!(
        "<meta name=\"twitter:description\" content=\"{}\" />",
        params.description
    ));
    if let Some(image) = &params.image {
        tags.push_str(&format!(
            "\n<meta name=\"twitter:image\" content=\"{image}\" />"
        ));
    }
    tags
}

fn ld_json_script(schema: &Value) -> String {
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        serde_json::to_string_pretty(schema).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business_params() -> LocalBusinessParams {
        LocalBusinessParams {
            name: "Dumpster Rental Austin".to_string(),
            description: "Fast local service".to_string(),
            address: PostalAddress {
                street_address: "123 Main St".to_string(),
                locality: "Austin".to_string(),
                region: "TX".to_string(),
                postal_code: "78701".to_string(),
                country: "US".to_string(),
            },
            geo: None,
            telephone: None,
            url: "https://example.com/austin-tx".to_string(),
            price_range: None,
            area_served: None,
        }
    }

    #[test]
    fn test_local_business_schema_omits_absent_optionals() {
        let markup = local_business_schema(&business_params());
        assert!(markup.starts_with("<script type=\"application/ld+json\">"));
        assert!(markup.contains("\"LocalBusiness\""));
        assert!(markup.contains("\"addressLocality\": \"Austin\""));
        assert!(!markup.contains("telephone"));
        assert!(!markup.contains("geo"));
        assert!(!markup.contains("null"));
    }

    #[test]
    fn test_local_business_schema_includes_present_optionals() {
        let mut params = business_params();
        params.geo = Some(GeoCoordinates {
            latitude: 30.2672,
            longitude: -97.7431,
        });
        params.telephone = Some("+1-512-555-0100".to_string());
        params.area_served = Some(vec!["Round Rock".to_string()]);
        let markup = local_business_schema(&params);
        assert!(markup.contains("\"GeoCoordinates\""));
        assert!(markup.contains("+1-512-555-0100"));
        assert!(markup.contains("\"Round Rock\""));
    }

    #[test]
    fn test_faq_schema_wraps_each_question() {
        let faqs = vec![
            QuestionAnswer {
                question: "How much?".to_string(),
                answer: "It depends.".to_string(),
            },
            QuestionAnswer {
                question: "How long?".to_string(),
                answer: "A week.".to_string(),
            },
        ];
        let markup = faq_schema(&faqs);
        assert!(markup.contains("\"FAQPage\""));
        assert!(markup.contains("\"How much?\""));
        assert!(markup.contains("\"acceptedAnswer\""));
        assert_eq!(markup.matches("\"Question\"").count(), 2);
    }

    #[test]
    fn test_breadcrumb_positions_are_one_based() {
        let items = vec![
            BreadcrumbItem {
                name: "Home".to_string(),
                url: "https://example.com".to_string(),
            },
            BreadcrumbItem {
                name: "Austin".to_string(),
                url: "https://example.com/austin-tx".to_string(),
            },
        ];
        let markup = breadcrumb_schema(&items);
        assert!(markup.contains("\"position\": 1"));
        assert!(markup.contains("\"position\": 2"));
        assert!(markup.contains("\"BreadcrumbList\""));
    }

    #[test]
    fn test_organization_schema_omits_absent_optionals() {
        let markup = organization_schema(&OrganizationParams {
            name: "Acme Disposal".to_string(),
            url: "https://example.com".to_string(),
            logo: None,
            same_as: None,
            telephone: None,
            email: Some("info@example.com".to_string()),
        });
        assert!(markup.contains("\"Organization\""));
        assert!(markup.contains("info@example.com"));
        assert!(!markup.contains("logo"));
        assert!(!markup.contains("sameAs"));
    }

    #[test]
    fn test_meta_description_topic_table_with_fallback() {
        let roofing = meta_description("Austin", "TX", "topic", Some("Roofing"));
        assert!(roofing.contains("Roofing dumpster rental Austin, TX"));

        let unknown = meta_description("Austin", "TX", "topic", Some("gardening"));
        assert!(unknown.contains("Professional dumpster rental in Austin, TX"));

        let main = meta_description("Austin", "TX", "main_city", None);
        assert!(main.contains("Professional dumpster rental in Austin, TX"));
    }

    #[test]
    fn test_open_graph_tags_omit_image_when_absent() {
        let tags = open_graph_tags(&OpenGraphParams {
            title: "T".to_string(),
            description: "D".to_string(),
            url: "https://example.com/p".to_string(),
            image: None,
            og_type: None,
        });
        assert!(tags.contains("og:title"));
        assert!(tags.contains("content=\"website\""));
        assert!(!tags.contains("og:image"));
        assert!(!tags.contains("twitter:image"));
    }
}
