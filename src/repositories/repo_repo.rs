//! Repo repository for async database operations.
//!
//! Provides CRUD operations for the repos table using diesel_async.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewRepo, Repo, UpdateRepo};

/// Repo repository holding an async connection pool.
///
/// `AsyncDbPool` (bb8::Pool) uses `Arc` internally, so cloning is cheap.
#[derive(Clone)]
pub struct RepoRepository {
    pool: AsyncDbPool,
}

impl RepoRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new repo row.
    ///
    /// The access key is the primary key; a collision surfaces as
    /// `AppError::Duplicate` and is retried by the service layer.
    pub async fn create(&self, new_repo: NewRepo) -> Result<Repo, AppError> {
        use crate::schema::repos::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::insert_into(repos)
            .values(&new_repo)
            .returning(Repo::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a repo by its access key.
    pub async fn find_by_key(&self, key: &str) -> Result<Option<Repo>, AppError> {
        use crate::schema::repos::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        repos
            .filter(access_key.eq(key))
            .select(Repo::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies a partial update (None fields are ignored) and returns the
    /// updated row.
    pub async fn update(&self, key: &str, changes: UpdateRepo) -> Result<Repo, AppError> {
        use crate::schema::repos::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::update(repos.filter(access_key.eq(key)))
            .set(&changes)
            .returning(Repo::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Stamps `last_visited` with the database clock and returns the
    /// refreshed row.
    pub async fn touch_last_visited(&self, key: &str) -> Result<Repo, AppError> {
        use crate::schema::repos::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::update(repos.filter(access_key.eq(key)))
            .set(last_visited.eq(diesel::dsl::now))
            .returning(Repo::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a repo; its entries go with it via the FK cascade.
    ///
    /// Returns the number of affected repo rows (0 or 1).
    pub async fn delete(&self, key: &str) -> Result<usize, AppError> {
        use crate::schema::repos::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::delete(repos.filter(access_key.eq(key)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
