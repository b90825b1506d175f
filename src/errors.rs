// ABOUTME: Error taxonomy for schedule reconciliation and storage
// ABOUTME: Distinguishes hard session-fetch failures from other database errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use thiserror::Error;

/// Errors surfaced by the scheduling core and its storage adapters.
///
/// Only [`ScheduleError::SessionFetch`] aborts a weekly view; every other
/// failure along that path is logged and degraded per-day.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The week's session rows could not be loaded at all.
    #[error("session fetch failed: {context}")]
    SessionFetch { context: String },

    /// A storage operation failed (connection, migration, query).
    #[error("database error: {context}")]
    Database { context: String },

    /// Stored data could not be interpreted (bad UUID, date, or JSON).
    #[error("invalid data: {context}")]
    InvalidData { context: String },
}

impl ScheduleError {
    pub fn session_fetch(context: impl Into<String>) -> Self {
        Self::SessionFetch {
            context: context.into(),
        }
    }

    pub fn database(context: impl Into<String>) -> Self {
        Self::Database {
            context: context.into(),
        }
    }

    pub fn invalid_data(context: impl Into<String>) -> Self {
        Self::InvalidData {
            context: context.into(),
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
