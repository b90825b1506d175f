// ABOUTME: Async repository and resolver contracts consumed by the scheduling core
// ABOUTME: Implementations are injected explicitly; the core never constructs its own backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Repository contracts.
//!
//! The reconciler and sweeper are written against these traits so they can be
//! unit-tested with in-memory fakes and backed by any persistence technology
//! in production. The crate ships a SQLite implementation in
//! [`crate::database`].

use crate::errors::ScheduleResult;
use crate::models::{CreateSessionRequest, TemplateSummary, TrainingSession, WorkoutPlan};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Read/write access to persisted training sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch all sessions for a client with `start <= scheduled_date <= end`
    async fn fetch_sessions(
        &self,
        client_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>>;

    /// Fetch sessions still `scheduled` whose date is strictly before `today`
    async fn fetch_stale_scheduled(
        &self,
        client_id: Uuid,
        today: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>>;

    /// Bulk-transition the given sessions to `no_show`, stamping `updated_at`.
    ///
    /// Only rows still in `scheduled` status are touched; `completed` and
    /// `cancelled` rows are left alone even if their ids are passed. No-op on
    /// empty input. Returns the number of rows updated.
    async fn mark_many_as_no_show(&self, session_ids: &[Uuid]) -> ScheduleResult<u64>;

    /// Materialize a new session row
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> ScheduleResult<TrainingSession>;
}

/// Read access to recurring weekly plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// The client's active plan, if any.
    ///
    /// When a client has several plans the most recently updated one wins.
    async fn active_plan_for_client(&self, client_id: Uuid)
        -> ScheduleResult<Option<WorkoutPlan>>;
}

/// Read access to workout template summaries
#[async_trait]
pub trait TemplateResolver: Send + Sync {
    /// Resolve a template id to its summary; `None` when the id is unknown
    async fn resolve_template(&self, template_id: Uuid)
        -> ScheduleResult<Option<TemplateSummary>>;
}
