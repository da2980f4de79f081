//! Metadata scraping pipeline.
//!
//! Stateless per call: decode the input, decide whether it is fetchable,
//! fetch and classify, extract Open Graph tags, and gap-fill from the
//! enrichment API. Every failure path degrades to a smaller-but-valid tag
//! map; this service never returns an error to its caller.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::config::ScraperConfig;
use crate::external::enrich::EnrichmentClient;
use crate::external::scrape::{FetchedPage, fetch_page, parse_html};

/// Tags the pipeline tries to end up with; any gap triggers enrichment.
const REQUIRED_TAGS: [&str; 4] = ["title", "description", "image", "url"];
const CONNECT_FAILURE_NOTE: &str = "could not connect";

#[derive(Clone)]
pub struct ScrapeService {
    enrich: EnrichmentClient,
    timeout: Duration,
}

/// What to do with a decoded scrape input.
#[derive(Debug)]
enum FetchPlan {
    /// A web URL worth fetching. `had_scheme` records whether the caller
    /// spelled the scheme out; enrichment only runs when they did.
    Fetch { url: Url, had_scheme: bool },
    /// Short-circuit result, no network involved.
    Done(BTreeMap<String, String>),
}

impl ScrapeService {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            enrich: EnrichmentClient::new(config),
            timeout: Duration::from_secs(config.request_timeout),
        }
    }

    /// Runs the full pipeline for a possibly percent-encoded URL string.
    pub async fn scrape(&self, raw: &str) -> BTreeMap<String, String> {
        let decoded = match urlencoding::decode(raw) {
            Ok(cow) => match cow {
                Cow::Borrowed(s) => s.to_string(),
                Cow::Owned(s) => s,
            },
            Err(_) => raw.to_string(),
        };

        let (url, had_scheme) = match plan_fetch(&decoded) {
            FetchPlan::Done(tags) => return tags,
            FetchPlan::Fetch { url, had_scheme } => (url, had_scheme),
        };

        match fetch_page(&url, self.timeout).await {
            FetchedPage::Unreachable => unreachable_result(url.as_str()),
            FetchedPage::Image => image_result(url.as_str()),
            FetchedPage::Other => title_only(url.as_str()),
            FetchedPage::Html(body) => {
                let mut tags = parse_html(&body);
                let incomplete = REQUIRED_TAGS.iter().any(|tag| !tags.contains_key(*tag));
                if had_scheme && incomplete {
                    if let Some(extra) = self.enrich.fetch_tags(url.as_str()).await {
                        merge_missing(&mut tags, extra);
                    }
                }
                tags
            }
        }
    }
}

/// Classifies the decoded input: fetch it, or answer directly.
fn plan_fetch(decoded: &str) -> FetchPlan {
    match Url::parse(decoded) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => FetchPlan::Fetch {
            url,
            had_scheme: true,
        },
        // A non-web scheme is never fetched: answer with the host when one
        // parses, otherwise with the input itself.
        Ok(url) => {
            let title = url
                .host_str()
                .map(str::to_string)
                .unwrap_or_else(|| decoded.to_string());
            FetchPlan::Done(title_only(&title))
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(&format!("http://{decoded}")) {
                Ok(url) => FetchPlan::Fetch {
                    url,
                    had_scheme: false,
                },
                Err(_) => FetchPlan::Done(unreachable_result(decoded)),
            }
        }
        Err(_) => FetchPlan::Done(unreachable_result(decoded)),
    }
}

/// Merges `extra` into `tags` without overwriting anything already present.
fn merge_missing(tags: &mut BTreeMap<String, String>, extra: BTreeMap<String, String>) {
    for (key, value) in extra {
        tags.entry(key).or_insert(value);
    }
}

fn title_only(title: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("title".to_string(), title.to_string())])
}

fn image_result(url: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("title".to_string(), url.to_string()),
        ("image".to_string(), url.to_string()),
        ("url".to_string(), url.to_string()),
    ])
}

fn unreachable_result(url: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("url".to_string(), url.to_string()),
        ("description".to_string(), CONNECT_FAILURE_NOTE.to_string()),
    ])
}
