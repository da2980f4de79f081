//! Clients for everything outside the process boundary: the shared HTTP
//! client, scrape target fetching, and the enrichment API.

pub mod client;
pub mod enrich;
pub mod scrape;
