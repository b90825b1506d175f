// ABOUTME: SQLite reference adapter for the scheduling core's persistence contracts
// ABOUTME: Connection management, migrations, and row mapping shared by the query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! SQLite persistence.
//!
//! A concrete backend for the repository contracts so the crate is usable
//! end-to-end and integration-testable against `sqlite::memory:`. Host
//! applications on another store implement the [`crate::repositories`] traits
//! themselves and skip this module.

mod plans;
mod repositories;
mod sessions;
mod templates;

pub use repositories::{SqlitePlanRepository, SqliteSessionRepository, SqliteTemplateResolver};

use crate::errors::{ScheduleError, ScheduleResult};
use sqlx::SqlitePool;

/// Database manager for sessions, plans, and templates
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations.
    ///
    /// SQLite URLs get `mode=rwc` appended so the database file is created on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> ScheduleResult<Self> {
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| ScheduleError::database(format!("failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Reference to the underlying pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all migrations. Safe to repeat; every statement is
    /// `CREATE ... IF NOT EXISTS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails.
    pub async fn migrate(&self) -> ScheduleResult<()> {
        self.migrate_templates().await?;
        self.migrate_plans().await?;
        self.migrate_sessions().await?;
        Ok(())
    }
}
