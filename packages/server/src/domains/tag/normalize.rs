//! Tag parsing and normalization.
//!
//! Submissions carry tags either as a JSON array string or as free-form
//! comma-separated text. Both forms end up as a deduplicated list of
//! lowercase, single-spaced names in first-seen order.

use std::collections::HashSet;

/// Most tags a submission may carry.
pub const MAX_TAGS: usize = 10;

/// Longest allowed tag, in characters, after normalization.
pub const MAX_TAG_LEN: usize = 50;

/// Longest allowed raw tags text, in characters.
pub const MAX_RAW_TAGS_LEN: usize = 500;

/// Trim, collapse inner whitespace and lowercase a single tag.
pub fn normalize_tag(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Split raw tags text into candidate tags.
///
/// A JSON array of strings is taken element by element (non-string elements
/// are skipped). Anything else, including JSON scalars, is split on commas.
pub fn split_raw_tags(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => trimmed.split(',').map(str::to_string).collect(),
    }
}

/// Normalize, drop empties and deduplicate, keeping first occurrence order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Parse stored tags text (as written by [`to_json`]) back into names.
pub fn parse_stored_tags(stored: Option<&str>) -> Vec<String> {
    stored
        .map(|raw| normalize_tags(split_raw_tags(raw)))
        .unwrap_or_default()
}

/// Serialize normalized tags for storage as a JSON array string.
pub fn to_json(tags: &[String]) -> String {
    serde_json::Value::from(tags.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_tag("  Machine   Learning "), "machine learning");
        assert_eq!(normalize_tag("RUST"), "rust");
        assert_eq!(normalize_tag("\tweb\n dev "), "web dev");
    }

    #[test]
    fn splits_comma_separated_text() {
        assert_eq!(
            split_raw_tags("rust, web , ,ai"),
            vec!["rust", " web ", " ", "ai"]
        );
    }

    #[test]
    fn splits_json_array() {
        assert_eq!(
            split_raw_tags(r#"["Rust", "Web Dev", 3]"#),
            vec!["Rust", "Web Dev"]
        );
    }

    #[test]
    fn json_scalars_fall_back_to_commas() {
        assert_eq!(split_raw_tags("123"), vec!["123"]);
        assert_eq!(split_raw_tags("true, null"), vec!["true", " null"]);
    }

    #[test]
    fn empty_input_yields_no_tags() {
        assert!(split_raw_tags("   ").is_empty());
        assert!(parse_stored_tags(None).is_empty());
    }

    #[test]
    fn dedupes_after_normalizing_and_keeps_order() {
        let tags = normalize_tags(["Rust", "web", " rust ", "", "AI", "Web"]);
        assert_eq!(tags, vec!["rust", "web", "ai"]);
    }

    #[test]
    fn stored_tags_survive_json_roundtrip() {
        let tags = normalize_tags(["open source", "rust"]);
        let stored = to_json(&tags);
        assert_eq!(stored, r#"["open source","rust"]"#);
        assert_eq!(parse_stored_tags(Some(&stored)), tags);
    }

    #[test]
    fn legacy_comma_text_is_readable() {
        assert_eq!(
            parse_stored_tags(Some("Python, Data Science")),
            vec!["python", "data science"]
        );
    }
}
