// ABOUTME: Stale-session sweeper reclassifying overdue scheduled sessions as no_show
// ABOUTME: Idempotent maintenance pass run before weekly reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Stale-session sweep.
//!
//! Sessions left in `scheduled` past their date are flipped to `no_show` in
//! bulk. The sweep is idempotent: a second run finds zero candidates. Callers
//! treat a failed sweep as non-fatal; the day classification policy covers
//! unswept rows defensively.

use crate::errors::ScheduleResult;
use crate::repositories::SessionRepository;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Maintenance pass that reclassifies overdue `scheduled` sessions
pub struct StaleSessionSweeper {
    sessions: Arc<dyn SessionRepository>,
}

impl StaleSessionSweeper {
    /// Create a sweeper over the given session repository
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Flip all of the client's `scheduled` sessions dated before today (UTC
    /// civil date) to `no_show`. Returns the number of sessions updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the stale fetch or the bulk update fails. Callers
    /// building a weekly view treat this as a warning, not a failure.
    pub async fn mark_past_scheduled_as_missed(&self, client_id: Uuid) -> ScheduleResult<u64> {
        self.sweep_before(client_id, Utc::now().date_naive()).await
    }

    /// Sweep relative to an explicit cutoff date. Sessions dated strictly
    /// before `today` are candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the stale fetch or the bulk update fails.
    pub async fn sweep_before(&self, client_id: Uuid, today: NaiveDate) -> ScheduleResult<u64> {
        let stale = self
            .sessions
            .fetch_stale_scheduled(client_id, today)
            .await?;
        if stale.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = stale.iter().map(|s| s.id).collect();
        let updated = self.sessions.mark_many_as_no_show(&ids).await?;
        debug!(
            client_id = %client_id,
            candidates = ids.len(),
            updated,
            "reclassified stale scheduled sessions as no_show"
        );
        Ok(updated)
    }
}
