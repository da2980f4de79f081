//! Scrape endpoint DTOs.

use serde::Deserialize;

/// Query parameters for `GET /api/scrape`.
#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    /// Possibly percent-encoded URL to scrape.
    pub url: String,
}
