//! Open Graph tag extraction from raw HTML.
//!
//! A bounded substring scan rather than a full HTML parse: each
//! `property="og:*"` occurrence is read up to the *nearer* of the next
//! `/>` or `>` token, which keeps a malformed tag from swallowing the
//! rest of the document. Precedence is explicit: Open Graph values win;
//! `<title>` and `<meta name="description">` only fill gaps.

use std::collections::BTreeMap;

const OG_PROPERTY_MARKER: &str = "property=\"og:";
const CONTENT_MARKER: &str = "content=\"";

/// Extracts Open Graph tags with `<title>`/meta-description fallbacks.
///
/// Duplicate `og:` keys are last-one-wins. Pairs with an empty key or
/// value are skipped.
pub fn parse_html(content: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();

    let mut remain = content;
    while let Some(found) = remain.find(OG_PROPERTY_MARKER) {
        let after = &remain[found + OG_PROPERTY_MARKER.len()..];
        let meat = &after[..tag_boundary(after)];

        let key = meat.split('"').next().unwrap_or("");
        let value = meat
            .split_once(CONTENT_MARKER)
            .map(|(_, rest)| rest.trim_matches(['"', ' ']))
            .unwrap_or("");

        if !key.is_empty() && !value.is_empty() {
            tags.insert(key.to_string(), value.to_string());
        }
        remain = after;
    }

    if !tags.contains_key("title") {
        if let Some(title) = bounded_section(content, "<title>", "</title>") {
            if !title.is_empty() {
                tags.insert("title".to_string(), title.to_string());
            }
        }
    }
    if !tags.contains_key("description") {
        if let Some(description) =
            bounded_section(content, "<meta name=\"description\" content=\"", "\">")
        {
            if !description.is_empty() {
                tags.insert("description".to_string(), description.to_string());
            }
        }
    }

    tags
}

/// Offset of the nearer of `/>` and `>`, or the end of input when a tag
/// never closes.
fn tag_boundary(after: &str) -> usize {
    match (after.find("/>"), after.find('>')) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => after.len(),
    }
}

/// Text between `start` and `end`; runs to the end of input when `end`
/// never appears. `None` when `start` is absent.
fn bounded_section<'a>(content: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let (_, rest) = content.split_once(start)?;
    Some(rest.split_once(end).map(|(section, _)| section).unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_title_wins_over_title_element() {
        let html = r#"<meta property="og:title" content="Foo"/><title>Bar</title>"#;
        let tags = parse_html(html);
        assert_eq!(tags.get("title").map(String::as_str), Some("Foo"));
    }

    #[test]
    fn title_element_fallback_without_og_tags() {
        let tags = parse_html("<html><title>Bar</title></html>");
        assert_eq!(tags.get("title").map(String::as_str), Some("Bar"));
    }

    #[test]
    fn meta_description_fallback() {
        let html = r#"<meta name="description" content="A page about crabs">"#;
        let tags = parse_html(html);
        assert_eq!(
            tags.get("description").map(String::as_str),
            Some("A page about crabs")
        );
    }

    #[test]
    fn og_description_wins_over_meta_description() {
        let html = concat!(
            r#"<meta property="og:description" content="From OG"/>"#,
            r#"<meta name="description" content="From meta">"#,
        );
        let tags = parse_html(html);
        assert_eq!(tags.get("description").map(String::as_str), Some("From OG"));
    }

    #[test]
    fn extracts_several_properties() {
        let html = concat!(
            r#"<meta property="og:title" content="Foo"/>"#,
            r#"<meta property="og:image" content="https://x.test/i.png"/>"#,
            r#"<meta property="og:url" content="https://x.test/"/>"#,
        );
        let tags = parse_html(html);
        assert_eq!(tags.get("title").map(String::as_str), Some("Foo"));
        assert_eq!(
            tags.get("image").map(String::as_str),
            Some("https://x.test/i.png")
        );
        assert_eq!(tags.get("url").map(String::as_str), Some("https://x.test/"));
    }

    #[test]
    fn duplicate_keys_are_last_one_wins() {
        let html = concat!(
            r#"<meta property="og:title" content="First"/>"#,
            r#"<meta property="og:title" content="Second"/>"#,
        );
        let tags = parse_html(html);
        assert_eq!(tags.get("title").map(String::as_str), Some("Second"));
    }

    #[test]
    fn empty_content_is_skipped() {
        let html = r#"<meta property="og:title" content=""/><title>Fallback</title>"#;
        let tags = parse_html(html);
        assert_eq!(tags.get("title").map(String::as_str), Some("Fallback"));
    }

    #[test]
    fn scan_is_bounded_by_nearest_closing_token() {
        // The unclosed first tag must not swallow the second one.
        let html = concat!(
            r#"<meta property="og:title" content="Foo">"#,
            r#"<meta property="og:image" content="pic.png"/>"#,
        );
        let tags = parse_html(html);
        assert_eq!(tags.get("title").map(String::as_str), Some("Foo"));
        assert_eq!(tags.get("image").map(String::as_str), Some("pic.png"));
    }

    #[test]
    fn no_tags_yields_empty_map() {
        assert!(parse_html("<html><body>plain</body></html>").is_empty());
    }

    #[test]
    fn unterminated_title_runs_to_end_of_input() {
        let tags = parse_html("<title>Dangling");
        assert_eq!(tags.get("title").map(String::as_str), Some("Dangling"));
    }
}
