// ABOUTME: Weekly schedule reconciler deriving a seven-day status view for a client
// ABOUTME: Sweeps stale sessions, matches rows to dates, and falls back to the recurring plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Weekly schedule reconciliation.
//!
//! `get_weekly_view` produces exactly seven [`WeekDayView`] entries, Monday
//! through Sunday, for the week containing a reference date. Persisted
//! session rows win over the recurring plan's weekday schedule; the plan is
//! only consulted for dates with no matching row. Failures below the session
//! fetch degrade individual days instead of aborting the week.

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{TemplateSummary, TrainingSession, WeekDayView, WeeklySchedule};
use crate::policy;
use crate::repositories::{PlanRepository, SessionRepository, TemplateResolver};
use crate::sweeper::StaleSessionSweeper;
use crate::week;
use chrono::{Datelike, NaiveDate, Utc};
use futures_util::future;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Derives the weekly status view for a client from injected repositories
pub struct WeeklyScheduleReconciler {
    sessions: Arc<dyn SessionRepository>,
    plans: Arc<dyn PlanRepository>,
    templates: Arc<dyn TemplateResolver>,
    sweeper: StaleSessionSweeper,
}

impl WeeklyScheduleReconciler {
    /// Create a reconciler over the given collaborators
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        plans: Arc<dyn PlanRepository>,
        templates: Arc<dyn TemplateResolver>,
    ) -> Self {
        let sweeper = StaleSessionSweeper::new(Arc::clone(&sessions));
        Self {
            sessions,
            plans,
            templates,
            sweeper,
        }
    }

    /// Weekly view for the week containing `reference_date`, classified
    /// against the current UTC civil date.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::SessionFetch`] when the session repository
    /// cannot be reached for the week's fetch. All other failures degrade.
    pub async fn get_weekly_view(
        &self,
        client_id: Uuid,
        reference_date: NaiveDate,
    ) -> ScheduleResult<Vec<WeekDayView>> {
        self.weekly_view_as_of(client_id, reference_date, Utc::now().date_naive())
            .await
    }

    /// Weekly view with an explicit "today", for deterministic callers and
    /// tests. `reference_date` picks the week; `today` drives classification
    /// and the sweep cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::SessionFetch`] when the week's session fetch
    /// fails.
    pub async fn weekly_view_as_of(
        &self,
        client_id: Uuid,
        reference_date: NaiveDate,
        today: NaiveDate,
    ) -> ScheduleResult<Vec<WeekDayView>> {
        let dates = week::week_dates(reference_date);

        // Sweep-then-read ordering: a fresh fetch never shows a stale
        // `scheduled` row the sweep would have corrected, if the sweep
        // succeeds. Failure is non-fatal; rule 4 of the policy backstops it.
        if let Err(err) = self.sweeper.sweep_before(client_id, today).await {
            warn!(
                client_id = %client_id,
                error = %err,
                "stale-session sweep failed; continuing with unswept data"
            );
        }

        let sessions = self
            .sessions
            .fetch_sessions(client_id, dates[0], dates[6])
            .await
            .map_err(|e| ScheduleError::session_fetch(e.to_string()))?;

        let schedule = match self.plans.active_plan_for_client(client_id).await {
            Ok(plan) => plan.map(|p| p.schedule_data),
            Err(err) => {
                warn!(
                    client_id = %client_id,
                    error = %err,
                    "plan lookup failed; weekly view falls back to sessions only"
                );
                None
            }
        };

        debug!(
            client_id = %client_id,
            week_start = %dates[0],
            sessions = sessions.len(),
            has_plan = schedule.is_some(),
            "assembling weekly view"
        );

        // Per-day template resolution has no ordering dependency; resolve the
        // seven days concurrently and wait for all of them.
        let days = dates
            .iter()
            .map(|&date| self.day_view(date, &sessions, schedule.as_ref(), today));
        Ok(future::join_all(days).await)
    }

    async fn day_view(
        &self,
        date: NaiveDate,
        sessions: &[TrainingSession],
        schedule: Option<&WeeklySchedule>,
        today: NaiveDate,
    ) -> WeekDayView {
        let session = pick_session_for(sessions, date);

        let template_id = session.map_or_else(
            || schedule.and_then(|s| s.template_for(date.weekday())),
            |s| s.template_id,
        );
        let template = match template_id {
            Some(id) => self.resolve_template_lossy(id, date).await,
            None => None,
        };

        let outcome = policy::classify(session, today);
        let mut day = WeekDayView::rest_day(date);
        day.template = template;
        day.completed = outcome.completed;
        day.missed = outcome.missed;
        day.session_id = session.map(|s| s.id);
        day.scheduled_time = session.and_then(|s| s.scheduled_time.clone());
        day
    }

    /// Resolve a template, degrading to `None` on failure so one bad lookup
    /// never costs the rest of the week.
    async fn resolve_template_lossy(
        &self,
        template_id: Uuid,
        date: NaiveDate,
    ) -> Option<TemplateSummary> {
        match self.templates.resolve_template(template_id).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(
                    template_id = %template_id,
                    date = %date,
                    error = %err,
                    "template resolution failed; day shown without template"
                );
                None
            }
        }
    }
}

/// The session matching a date. When multiple rows share the date the one
/// with the greatest `updated_at` wins, with `id` as the final disambiguator,
/// so the choice is deterministic regardless of repository return order.
fn pick_session_for(sessions: &[TrainingSession], date: NaiveDate) -> Option<&TrainingSession> {
    sessions
        .iter()
        .filter(|s| s.scheduled_date == date)
        .max_by_key(|s| (s.updated_at, s.id))
}
