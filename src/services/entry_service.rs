//! Entry service: repo-scoped batch mutations.
//!
//! Every batch authorizes against the session, then validates every
//! referenced id (existence and ownership) before anything is written.
//! A batch that passes validation commits as one store transaction; a
//! batch that fails validation commits nothing.

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{NewEntry, UpdateEntry};
use crate::repositories::{EntryRepository, RepoRepository};
use crate::services::authorization::authorize_write;
use crate::session::SessionContext;

#[derive(Clone)]
pub struct EntryService {
    repos: RepoRepository,
    entries: EntryRepository,
}

impl EntryService {
    pub fn new(repos: RepoRepository, entries: EntryRepository) -> Self {
        Self { repos, entries }
    }

    async fn authorized_repo(&self, key: &str, ctx: &SessionContext) -> AppResult<()> {
        let repo = self
            .repos
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::repo_not_found(key))?;
        authorize_write(&repo.access_key, ctx)
    }

    /// Creates a batch of entries for the repo. Returns the count created.
    pub async fn create_entries(
        &self,
        key: &str,
        ctx: &SessionContext,
        rows: Vec<NewEntry>,
    ) -> AppResult<usize> {
        self.authorized_repo(key, ctx).await?;

        if rows.is_empty() {
            return Err(AppError::BadRequest {
                message: "no entries provided".to_string(),
            });
        }

        self.entries.insert_batch(rows).await
    }

    /// Applies a batch of entry updates. Returns the count updated.
    ///
    /// Every id must exist (400 naming the id) and belong to this repo
    /// (403 naming the mismatch); checks run before any update is applied.
    pub async fn update_entries(
        &self,
        key: &str,
        ctx: &SessionContext,
        changes: Vec<(i32, UpdateEntry)>,
    ) -> AppResult<usize> {
        self.authorized_repo(key, ctx).await?;

        if changes.is_empty() {
            return Err(AppError::BadRequest {
                message: "no entry changes provided".to_string(),
            });
        }
        for (entry_id, change) in &changes {
            if change.is_empty() {
                return Err(AppError::BadRequest {
                    message: format!("no fields to update for entry {entry_id}"),
                });
            }
        }

        let ids: Vec<i32> = changes.iter().map(|(entry_id, _)| *entry_id).collect();
        self.validate_ownership(key, &ids).await?;

        self.entries.update_batch(changes).await
    }

    /// Deletes a batch of entries by id. Returns the count deleted.
    pub async fn delete_entries(
        &self,
        key: &str,
        ctx: &SessionContext,
        ids: Vec<i32>,
    ) -> AppResult<usize> {
        self.authorized_repo(key, ctx).await?;

        if ids.is_empty() {
            return Err(AppError::BadRequest {
                message: "no entry ids provided".to_string(),
            });
        }

        self.validate_ownership(key, &ids).await?;

        self.entries.delete_by_ids(&ids).await
    }

    /// Validates that every id exists and belongs to the repo, before any
    /// mutation touches the store.
    async fn validate_ownership(&self, key: &str, ids: &[i32]) -> AppResult<()> {
        let found = self.entries.load_by_ids(ids).await?;
        let owners: HashMap<i32, String> = found
            .into_iter()
            .map(|entry| (entry.id, entry.repo_access_key))
            .collect();

        check_batch_ownership(key, ids, &owners)
    }
}

/// Pure ownership check over the loaded id → owning-repo map.
///
/// An unknown id aborts the batch as a `BadRequest` naming the id; an id
/// owned by a different repo aborts it as `Forbidden` naming the mismatch.
fn check_batch_ownership(key: &str, ids: &[i32], owners: &HashMap<i32, String>) -> AppResult<()> {
    for entry_id in ids {
        match owners.get(entry_id) {
            None => {
                return Err(AppError::BadRequest {
                    message: format!("entry {entry_id} does not exist"),
                });
            }
            Some(owner) if owner != key => {
                return Err(AppError::Forbidden {
                    message: format!("entry {entry_id} belongs to another repo"),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners() -> HashMap<i32, String> {
        HashMap::from([
            (1, "123abcDEF0".to_string()),
            (2, "123abcDEF0".to_string()),
            (3, "private123".to_string()),
        ])
    }

    #[test]
    fn batch_with_owned_ids_passes() {
        assert!(check_batch_ownership("123abcDEF0", &[1, 2], &owners()).is_ok());
    }

    #[test]
    fn unknown_id_fails_the_whole_batch_naming_it() {
        let err = check_batch_ownership("123abcDEF0", &[1, -1], &owners()).unwrap_err();
        match err {
            AppError::BadRequest { message } => assert!(message.contains("-1")),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn foreign_id_fails_the_whole_batch_naming_it() {
        let err = check_batch_ownership("123abcDEF0", &[1, 3], &owners()).unwrap_err();
        match err {
            AppError::Forbidden { message } => assert!(message.contains('3')),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn validation_runs_before_any_valid_prefix_matters() {
        // A bad id anywhere in the batch rejects it, even when every other
        // id is fine.
        let ids: Vec<i32> = vec![1, 2, 99];
        assert!(check_batch_ownership("123abcDEF0", &ids, &owners()).is_err());
    }
}
