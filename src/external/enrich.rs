//! Remote metadata enrichment API client.
//!
//! Strictly best-effort: the client never returns an error. Any failure
//! (missing configuration, connection trouble, a non-success status, an
//! unusable body) yields `None` and the caller keeps its local result.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::external::client::HTTP_CLIENT;

#[derive(Clone)]
pub struct EnrichmentClient {
    api_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl EnrichmentClient {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            api_url: config.enrich_api_url.clone(),
            api_key: config.enrich_api_key.clone(),
            timeout: Duration::from_secs(config.request_timeout),
        }
    }

    /// Queries the enrichment API for tags describing `url`.
    ///
    /// Returns the non-empty string fields of the response object, or
    /// `None` when the client is unconfigured or anything goes wrong.
    pub async fn fetch_tags(&self, url: &str) -> Option<BTreeMap<String, String>> {
        let api_url = self.api_url.as_deref()?;
        let api_key = self.api_key.as_deref()?;

        let response = HTTP_CLIENT
            .get(api_url)
            .timeout(self.timeout)
            .query(&[("url", url), ("key", api_key)])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;

        let body: serde_json::Value = response.json().await.ok()?;
        let tags = flatten_string_fields(&body);
        if tags.is_empty() { None } else { Some(tags) }
    }
}

/// Collects the top-level string fields of a JSON object, dropping empty
/// values.
fn flatten_string_fields(value: &serde_json::Value) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    if let Some(object) = value.as_object() {
        for (key, field) in object {
            if let Some(text) = field.as_str() {
                if !text.is_empty() {
                    tags.insert(key.clone(), text.to_string());
                }
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_only_non_empty_string_fields() {
        let body = json!({
            "title": "A page",
            "description": "",
            "image": "https://x.test/i.png",
            "weight": 12,
            "nested": {"title": "ignored"},
        });
        let tags = flatten_string_fields(&body);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("title").map(String::as_str), Some("A page"));
        assert_eq!(
            tags.get("image").map(String::as_str),
            Some("https://x.test/i.png")
        );
    }

    #[test]
    fn non_object_bodies_flatten_to_nothing() {
        assert!(flatten_string_fields(&json!(["a", "b"])).is_empty());
        assert!(flatten_string_fields(&json!("plain")).is_empty());
    }

    #[tokio::test]
    async fn unconfigured_client_returns_none() {
        let client = EnrichmentClient {
            api_url: None,
            api_key: None,
            timeout: Duration::from_secs(1),
        };
        assert!(client.fetch_tags("https://example.com").await.is_none());
    }
}
