// ABOUTME: Library entry point for the trainsched weekly scheduling core
// ABOUTME: Exposes reconciliation, sweeping, classification, and repository contracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

#![deny(unsafe_code)]

//! # Trainsched
//!
//! The weekly training-session scheduling and reconciliation core of a
//! fitness-coaching application, extracted as a backend-agnostic library.
//!
//! Given a client's persisted session rows and an optional recurring weekly
//! plan, the reconciler derives a seven-day view (Monday through Sunday) in
//! which each day is empty, upcoming, completed, or missed. Before reading,
//! it runs a self-healing sweep that reclassifies overdue `scheduled`
//! sessions as `no_show`.
//!
//! ## Architecture
//!
//! - **Repositories**: async contracts for sessions, plans, and templates;
//!   injected explicitly so the core tests against fakes
//! - **Policy**: pure day classification, exhaustively testable
//! - **Sweeper**: idempotent stale-session maintenance pass
//! - **Reconciler**: assembles the weekly view, degrading per day on failure
//! - **Database**: a SQLite reference backend for the contracts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trainsched::database::{
//!     Database, SqlitePlanRepository, SqliteSessionRepository, SqliteTemplateResolver,
//! };
//! use trainsched::errors::ScheduleResult;
//! use trainsched::reconciler::WeeklyScheduleReconciler;
//!
//! #[tokio::main]
//! async fn main() -> ScheduleResult<()> {
//!     let db = Database::new("sqlite:trainsched.db").await?;
//!     let reconciler = WeeklyScheduleReconciler::new(
//!         Arc::new(SqliteSessionRepository::new(db.clone())),
//!         Arc::new(SqlitePlanRepository::new(db.clone())),
//!         Arc::new(SqliteTemplateResolver::new(db)),
//!     );
//!
//!     let client_id = uuid::Uuid::new_v4();
//!     let today = chrono::Utc::now().date_naive();
//!     let week = reconciler.get_weekly_view(client_id, today).await?;
//!     for day in week {
//!         println!("{} {}: completed={}", day.day_name, day.date, day.completed);
//!     }
//!     Ok(())
//! }
//! ```

/// SQLite reference backend for the repository contracts
pub mod database;

/// Error taxonomy and result alias
pub mod errors;

/// Logging configuration and tracing-subscriber setup
pub mod logging;

/// Domain types: sessions, plans, templates, weekly views
pub mod models;

/// Defensive parse-or-default JSON handling
pub mod parsing;

/// Pure day classification policy
pub mod policy;

/// Weekly schedule reconciliation
pub mod reconciler;

/// Async repository and resolver contracts
pub mod repositories;

/// Stale-session sweep
pub mod sweeper;

/// Test data builders and in-memory repository fakes
pub mod test_utils;

/// Monday-start week construction
pub mod week;

pub use errors::{ScheduleError, ScheduleResult};
pub use models::{
    SessionStatus, TemplateSummary, TrainingSession, WeekDayView, WeeklySchedule, WorkoutPlan,
};
pub use reconciler::WeeklyScheduleReconciler;
pub use sweeper::StaleSessionSweeper;
