//! SEO-friendly URL slugs.

/// Joins the given parts into a lowercase, hyphen-separated slug containing
/// only `[a-z0-9-]`, with no leading, trailing, or duplicate hyphens.
/// Empty parts are dropped; an empty input produces an empty string.
pub fn generate_slug<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .filter(|p| !p.as_ref().is_empty())
        .map(|p| p.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join("-");

    let mut slug = String::with_capacity(joined.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen
    for c in joined.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_city_state() {
        assert_eq!(generate_slug(["Austin", "TX"]), "austin-tx");
    }

    #[test]
    fn test_punctuation_collapses_to_single_hyphens() {
        assert_eq!(generate_slug(["New York!", "NY"]), "new-york-ny");
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        assert_eq!(generate_slug(["Austin", "", "TX"]), "austin-tx");
    }

    #[test]
    fn test_empty_input_produces_empty_slug() {
        assert_eq!(generate_slug(Vec::<String>::new()), "");
    }

    #[test]
    fn test_no_leading_or_trailing_hyphens() {
        assert_eq!(generate_slug(["--Austin--", "TX!!"]), "austin-tx");
    }

    #[test]
    fn test_output_alphabet_is_constrained() {
        let slug = generate_slug(["St. Paul", "MN", "Como Park/Falcon Heights"]);
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.contains("--"));
        assert_eq!(slug, "st-paul-mn-como-park-falcon-heights");
    }
}
