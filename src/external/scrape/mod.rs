//! Scrape target fetching and tag extraction.

pub mod client;
pub mod parser;

pub use client::{ContentKind, FetchedPage, classify_content_type, fetch_page};
pub use parser::parse_html;
