//! Entry repository for async database operations.
//!
//! Batch mutations validate in the service layer first; everything here
//! commits atomically. Multi-row inserts and deletes are single
//! statements, batch updates run inside one transaction.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Entry, NewEntry, UpdateEntry};

#[derive(Clone)]
pub struct EntryRepository {
    pool: AsyncDbPool,
}

impl EntryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists a repo's entries in display order: `sequence` ascending with
    /// unsequenced entries last, ties broken by id.
    pub async fn list_for_repo(&self, key: &str) -> Result<Vec<Entry>, AppError> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        entries
            .filter(repo_access_key.eq(key))
            .order((sequence.asc().nulls_last(), id.asc()))
            .select(Entry::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Loads the entries matching the given ids. Missing ids are simply
    /// absent from the result; existence checks happen in the service.
    pub async fn load_by_ids(&self, ids: &[i32]) -> Result<Vec<Entry>, AppError> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        entries
            .filter(id.eq_any(ids.to_vec()))
            .select(Entry::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Inserts a batch of entries in one statement.
    pub async fn insert_batch(&self, rows: Vec<NewEntry>) -> Result<usize, AppError> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::insert_into(entries)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a batch of per-entry change sets inside one transaction:
    /// either every update commits or none does.
    pub async fn update_batch(&self, changes: Vec<(i32, UpdateEntry)>) -> Result<usize, AppError> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                let mut updated = 0;
                for (entry_id, change) in &changes {
                    updated += diesel::update(entries.filter(id.eq(*entry_id)))
                        .set(change)
                        .execute(conn)
                        .await?;
                }
                Ok(updated)
            }
            .scope_boxed()
        })
        .await
        .map_err(AppError::from)
    }

    /// Deletes the given ids in one statement.
    pub async fn delete_by_ids(&self, ids: &[i32]) -> Result<usize, AppError> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::delete(entries.filter(id.eq_any(ids.to_vec())))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
