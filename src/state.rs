//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::session::SessionStore;

/// Application state containing all shared services and resources.
///
/// Designed for Axum's State extractor; cloning is cheap since services,
/// the pool and the session store all use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Per-client session store backing the authorization engine
    pub sessions: SessionStore,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Whether session cookies carry the Secure attribute
    pub cookie_secure: bool,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and settings.
    ///
    /// Initializes all repositories and services from the provided pool.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, &settings.scraper);
        Self {
            services,
            sessions: SessionStore::new(),
            db_pool: pool,
            cookie_secure: settings.session.cookie_secure,
        }
    }
}
