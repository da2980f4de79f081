//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for repos and their entries.

mod entry_repo;
mod repo_repo;

pub use entry_repo::EntryRepository;
pub use repo_repo::RepoRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub repos: RepoRepository,
    pub entries: EntryRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            repos: RepoRepository::new(pool.clone()),
            entries: EntryRepository::new(pool),
        }
    }
}
