//! Repo service for business logic operations.
//!
//! Owns repo lifecycle: creation (passphrase hashing + access key
//! generation with collision retry), authentication, authorized reads,
//! partial updates, and passphrase-verified deletion.

use crate::error::{AppError, AppResult};
use crate::models::{Entry, NewRepo, Repo, UpdateRepo};
use crate::repositories::{EntryRepository, RepoRepository};
use crate::services::authorization::{authorize_read, authorize_write};
use crate::session::SessionContext;
use crate::utils::access_key::generate_access_key;
use crate::utils::password::{hash_passphrase, verify_passphrase};

/// Key collisions are retried internally; the conflict never reaches the
/// caller.
const MAX_KEY_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct RepoService {
    repos: RepoRepository,
    entries: EntryRepository,
}

impl RepoService {
    pub fn new(repos: RepoRepository, entries: EntryRepository) -> Self {
        Self { repos, entries }
    }

    /// Creates a repo: hashes the passphrase, generates a fresh access key
    /// (regenerating internally on the off-chance collision) and stores the
    /// row. Returns the created repo.
    pub async fn create_repo(
        &self,
        pass_phrase: &str,
        title: Option<String>,
        description: Option<String>,
        is_private: bool,
    ) -> AppResult<Repo> {
        let hashed = hash_passphrase(pass_phrase)?;

        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let new_repo = NewRepo {
                access_key: generate_access_key(),
                pass_phrase: hashed.clone(),
                title: title.clone(),
                description: description.clone(),
                is_private,
            };
            match self.repos.create(new_repo).await {
                Err(AppError::Duplicate { .. }) => {
                    tracing::warn!(attempt, "access key collision, regenerating");
                }
                result => return result,
            }
        }

        Err(AppError::Internal {
            source: anyhow::anyhow!(
                "exhausted {MAX_KEY_ATTEMPTS} access key generation attempts"
            ),
        })
    }

    /// Verifies a passphrase against a repo.
    ///
    /// Unknown key → `NotFound`; wrong passphrase → `Unauthorized` with no
    /// detail beyond "wrong credentials".
    pub async fn authenticate(&self, key: &str, pass_phrase: &str) -> AppResult<()> {
        let repo = self
            .repos
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::repo_not_found(key))?;

        if verify_passphrase(pass_phrase, &repo.pass_phrase)? {
            Ok(())
        } else {
            Err(AppError::Unauthorized {
                message: "wrong credentials".to_string(),
            })
        }
    }

    /// Authorized read: applies the privacy rules, stamps `last_visited`,
    /// and returns the repo with its entries in display order.
    pub async fn view_repo(
        &self,
        key: &str,
        ctx: &SessionContext,
    ) -> AppResult<(Repo, Vec<Entry>)> {
        let repo = self
            .repos
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::repo_not_found(key))?;

        authorize_read(&repo.access_key, repo.is_private, ctx)?;

        let repo = self.repos.touch_last_visited(key).await?;
        let entries = self.entries.list_for_repo(key).await?;
        Ok((repo, entries))
    }

    /// Session-authorized partial update. All provided fields apply
    /// atomically; an empty patch is a `BadRequest`.
    pub async fn update_repo(
        &self,
        key: &str,
        ctx: &SessionContext,
        changes: UpdateRepo,
    ) -> AppResult<(Repo, Vec<Entry>)> {
        let repo = self
            .repos
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::repo_not_found(key))?;

        authorize_write(&repo.access_key, ctx)?;

        if changes.is_empty() {
            return Err(AppError::BadRequest {
                message: "no fields to update".to_string(),
            });
        }

        let updated = self.repos.update(key, changes).await?;
        let entries = self.entries.list_for_repo(key).await?;
        Ok((updated, entries))
    }

    /// Deletes a repo. The passphrase is verified fresh; a session
    /// binding alone is never accepted for deletion. Entries cascade away
    /// with the row.
    pub async fn delete_repo(&self, key: &str, pass_phrase: &str) -> AppResult<()> {
        let repo = self
            .repos
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::repo_not_found(key))?;

        if !verify_passphrase(pass_phrase, &repo.pass_phrase)? {
            return Err(AppError::Unauthorized {
                message: "wrong credentials".to_string(),
            });
        }

        self.repos.delete(key).await?;
        Ok(())
    }
}
