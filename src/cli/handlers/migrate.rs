//! Migrate command handler
//!
//! Runs embedded diesel migrations against the configured database.
//! Diesel's migration harness is synchronous, so the work runs on a
//! blocking thread.

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    settings: Settings,
}

impl MigrateCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Execute the migrate command.
    ///
    /// # Arguments
    /// * `dry_run` - If true, shows pending migrations without applying them
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.show_pending_migrations().await
        } else {
            self.run_migrations().await
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let database_url = self.settings.database.url.clone();
        let pending: Vec<String> = tokio::task::spawn_blocking(move || {
            use diesel_migrations::MigrationHarness;

            let mut conn = Self::establish(&database_url)?;
            let pending = conn.pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                }
            })?;

            Ok::<_, AppError>(pending.iter().map(|m| m.name().to_string()).collect())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if pending.is_empty() {
            println!("No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  {name}");
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let database_url = self.settings.database.url.clone();
        let applied: Vec<String> = tokio::task::spawn_blocking(move || {
            use diesel_migrations::MigrationHarness;

            let mut conn = Self::establish(&database_url)?;
            let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::Database {
                    operation: "run pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                }
            })?;

            Ok::<_, AppError>(applied.iter().map(|m| m.to_string()).collect())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if applied.is_empty() {
            println!("Database already up to date");
        } else {
            for name in &applied {
                println!("Applied migration: {name}");
            }
        }

        Ok(())
    }

    fn establish(database_url: &str) -> Result<diesel::pg::PgConnection, AppError> {
        use diesel::Connection;

        diesel::pg::PgConnection::establish(database_url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::anyhow!("Connection error: {}", e),
        })
    }
}
