// ABOUTME: SQLite implementations of the repository contracts by delegation to Database
// ABOUTME: Thin newtypes so the reconciler stays backend-agnostic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use super::Database;
use crate::errors::ScheduleResult;
use crate::models::{CreateSessionRequest, TemplateSummary, TrainingSession, WorkoutPlan};
use crate::repositories::{PlanRepository, SessionRepository, TemplateResolver};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// SQLite implementation of `SessionRepository`
pub struct SqliteSessionRepository {
    db: Database,
}

impl SqliteSessionRepository {
    /// Create a repository over the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn fetch_sessions(
        &self,
        client_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        self.db.sessions_in_range(client_id, start, end).await
    }

    async fn fetch_stale_scheduled(
        &self,
        client_id: Uuid,
        today: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        self.db.stale_scheduled_sessions(client_id, today).await
    }

    async fn mark_many_as_no_show(&self, session_ids: &[Uuid]) -> ScheduleResult<u64> {
        self.db.mark_sessions_no_show(session_ids).await
    }

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> ScheduleResult<TrainingSession> {
        self.db.insert_session(request).await
    }
}

/// SQLite implementation of `PlanRepository`
pub struct SqlitePlanRepository {
    db: Database,
}

impl SqlitePlanRepository {
    /// Create a repository over the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for SqlitePlanRepository {
    async fn active_plan_for_client(
        &self,
        client_id: Uuid,
    ) -> ScheduleResult<Option<WorkoutPlan>> {
        self.db.active_plan_for_client(client_id).await
    }
}

/// SQLite implementation of `TemplateResolver`
pub struct SqliteTemplateResolver {
    db: Database,
}

impl SqliteTemplateResolver {
    /// Create a resolver over the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemplateResolver for SqliteTemplateResolver {
    async fn resolve_template(
        &self,
        template_id: Uuid,
    ) -> ScheduleResult<Option<TemplateSummary>> {
        self.db.get_template(template_id).await
    }
}
