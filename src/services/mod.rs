//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

pub mod authorization;
mod entry_service;
mod repo_service;
mod scrape_service;

pub use entry_service::EntryService;
pub use repo_service::RepoService;
pub use scrape_service::ScrapeService;

use crate::config::ScraperConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub repos: RepoService,
    pub entries: EntryService,
    pub scrape: ScrapeService,
}

impl Services {
    /// Creates a new Services instance from Repositories and the scraper
    /// settings.
    pub fn new(repos: Repositories, scraper: &ScraperConfig) -> Self {
        Self {
            repos: RepoService::new(repos.repos.clone(), repos.entries.clone()),
            entries: EntryService::new(repos.repos, repos.entries),
            scrape: ScrapeService::new(scraper),
        }
    }
}
