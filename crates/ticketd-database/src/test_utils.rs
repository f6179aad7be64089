//! Test utilities for database integration tests
//!
//! Provides a migrated in-memory SQLite database for integration tests
//! across the ticketd crates. Each `TestDatabase` is fully isolated from
//! every other instance.

use crate::DbConnection;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use ticketd_migrations::Migrator;

/// Test database backed by an in-memory SQLite instance
pub struct TestDatabase {
    pub db: Arc<DbConnection>,
}

impl TestDatabase {
    /// Create a new migrated test database.
    ///
    /// The pool is limited to a single connection: every pooled SQLite
    /// connection to `sqlite::memory:` would otherwise see its own
    /// private database.
    pub async fn new() -> anyhow::Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);

        let db = Database::connect(opt)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to test database: {}", e))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

        Ok(TestDatabase { db: Arc::new(db) })
    }
}
