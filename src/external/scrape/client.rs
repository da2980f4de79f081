//! Page fetching and content classification for the scraper.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::external::client::HTTP_CLIENT;

/// Outcome of fetching a scrape target, classified by Content-Type.
#[derive(Debug)]
pub enum FetchedPage {
    /// Connection failure, timeout, or non-success status.
    Unreachable,
    /// One of the recognized image MIME types; no body needed.
    Image,
    /// An HTML document with its body text.
    Html(String),
    /// Anything else (PDFs, JSON, plain text, ...).
    Other,
}

/// MIME classification used to route the scrape result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Html,
    Other,
}

/// Classifies a Content-Type header value, ignoring parameters and case.
pub fn classify_content_type(content_type: &str) -> ContentKind {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" => ContentKind::Image,
        "text/html" | "application/xhtml+xml" => ContentKind::Html,
        _ => ContentKind::Other,
    }
}

/// Fetches a page once (no retries) with a bounded timeout and classifies
/// the response. Every failure collapses into `Unreachable`; nothing here
/// returns an error.
pub async fn fetch_page(url: &Url, timeout: Duration) -> FetchedPage {
    let response = match HTTP_CLIENT
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .and_then(|response| response.error_for_status())
    {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(url = %url, error = %error, "scrape fetch failed");
            return FetchedPage::Unreachable;
        }
    };

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    match classify_content_type(&content_type) {
        ContentKind::Image => FetchedPage::Image,
        ContentKind::Other => FetchedPage::Other,
        ContentKind::Html => match response.text().await {
            Ok(body) => FetchedPage::Html(body),
            Err(error) => {
                tracing::debug!(url = %url, error = %error, "scrape body read failed");
                FetchedPage::Unreachable
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_image_types() {
        for mime in ["image/jpeg", "image/png", "image/gif", "image/webp"] {
            assert_eq!(classify_content_type(mime), ContentKind::Image);
        }
    }

    #[test]
    fn unlisted_image_types_are_other() {
        assert_eq!(classify_content_type("image/svg+xml"), ContentKind::Other);
    }

    #[test]
    fn html_with_charset_parameter() {
        assert_eq!(
            classify_content_type("text/html; charset=utf-8"),
            ContentKind::Html
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_content_type("TEXT/HTML"), ContentKind::Html);
        assert_eq!(classify_content_type("Image/PNG"), ContentKind::Image);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(classify_content_type("application/pdf"), ContentKind::Other);
        assert_eq!(classify_content_type(""), ContentKind::Other);
    }
}
