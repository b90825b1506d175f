// ABOUTME: Test data builders and in-memory repository fakes for consistent test setup
// ABOUTME: Centralizes session/plan/template construction and failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Test utilities.
//!
//! In-memory implementations of the repository contracts plus builders for
//! domain types. The fakes support failure injection so degradation paths in
//! the sweeper and reconciler can be exercised without a real backend.

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{
    CreateSessionRequest, SessionStatus, TemplateSummary, TrainingSession, WeeklySchedule,
    WorkoutPlan,
};
use crate::repositories::{PlanRepository, SessionRepository, TemplateResolver};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Create a test session for a client on a date with the given status
#[must_use]
pub fn create_test_session(
    client_id: Uuid,
    scheduled_date: NaiveDate,
    status: SessionStatus,
) -> TrainingSession {
    let now = Utc::now();
    TrainingSession {
        id: Uuid::new_v4(),
        client_id,
        trainer_id: Uuid::new_v4(),
        template_id: None,
        plan_id: None,
        scheduled_date,
        scheduled_time: None,
        status,
        duration_minutes: Some(60),
        session_type: Some("strength".to_owned()),
        location: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create a test session backed by a workout template
#[must_use]
pub fn create_test_session_with_template(
    client_id: Uuid,
    scheduled_date: NaiveDate,
    status: SessionStatus,
    template_id: Uuid,
) -> TrainingSession {
    let mut session = create_test_session(client_id, scheduled_date, status);
    session.template_id = Some(template_id);
    session
}

/// Create a test template summary with a fresh id
#[must_use]
pub fn create_test_template(
    name: &str,
    exercise_count: u32,
    estimated_duration_minutes: u32,
) -> TemplateSummary {
    TemplateSummary {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        exercise_count,
        estimated_duration_minutes,
    }
}

/// Create a test plan for a client with the given weekly schedule
#[must_use]
pub fn create_test_plan(client_id: Uuid, schedule_data: WeeklySchedule) -> WorkoutPlan {
    let now = Utc::now();
    WorkoutPlan {
        id: Uuid::new_v4(),
        client_id,
        trainer_id: Uuid::new_v4(),
        name: "Test plan".to_owned(),
        schedule_data,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory `SessionRepository` with failure injection
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<TrainingSession>>,
    fail_fetch_sessions: AtomicBool,
    fail_fetch_stale: AtomicBool,
    fail_updates: AtomicBool,
}

impl InMemorySessionRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session row
    pub fn insert(&self, session: TrainingSession) {
        lock_ignoring_poison(&self.sessions).push(session);
    }

    /// Copy of all stored rows
    #[must_use]
    pub fn snapshot(&self) -> Vec<TrainingSession> {
        lock_ignoring_poison(&self.sessions).clone()
    }

    /// Make `fetch_sessions` fail
    pub fn set_fail_fetch_sessions(&self, fail: bool) {
        self.fail_fetch_sessions.store(fail, Ordering::SeqCst);
    }

    /// Make `fetch_stale_scheduled` fail
    pub fn set_fail_fetch_stale(&self, fail: bool) {
        self.fail_fetch_stale.store(fail, Ordering::SeqCst);
    }

    /// Make `mark_many_as_no_show` fail
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn fetch_sessions(
        &self,
        client_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        if self.fail_fetch_sessions.load(Ordering::SeqCst) {
            return Err(ScheduleError::session_fetch("injected fetch failure"));
        }
        let sessions = lock_ignoring_poison(&self.sessions);
        Ok(sessions
            .iter()
            .filter(|s| {
                s.client_id == client_id && s.scheduled_date >= start && s.scheduled_date <= end
            })
            .cloned()
            .collect())
    }

    async fn fetch_stale_scheduled(
        &self,
        client_id: Uuid,
        today: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        if self.fail_fetch_stale.load(Ordering::SeqCst) {
            return Err(ScheduleError::database("injected stale-fetch failure"));
        }
        let sessions = lock_ignoring_poison(&self.sessions);
        Ok(sessions
            .iter()
            .filter(|s| {
                s.client_id == client_id
                    && s.status == SessionStatus::Scheduled
                    && s.scheduled_date < today
            })
            .cloned()
            .collect())
    }

    async fn mark_many_as_no_show(&self, session_ids: &[Uuid]) -> ScheduleResult<u64> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ScheduleError::database("injected update failure"));
        }
        if session_ids.is_empty() {
            return Ok(0);
        }
        let mut sessions = lock_ignoring_poison(&self.sessions);
        let now = Utc::now();
        let mut updated = 0;
        for session in sessions.iter_mut() {
            if session.status == SessionStatus::Scheduled && session_ids.contains(&session.id) {
                session.status = SessionStatus::NoShow;
                session.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> ScheduleResult<TrainingSession> {
        let now = Utc::now();
        let session = TrainingSession {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            trainer_id: request.trainer_id,
            template_id: request.template_id,
            plan_id: request.plan_id,
            scheduled_date: request.scheduled_date,
            scheduled_time: request.scheduled_time.clone(),
            status: SessionStatus::Scheduled,
            duration_minutes: request.duration_minutes,
            session_type: request.session_type.clone(),
            location: request.location.clone(),
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        lock_ignoring_poison(&self.sessions).push(session.clone());
        Ok(session)
    }
}

/// In-memory `PlanRepository` holding at most one plan per client
#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: Mutex<Vec<WorkoutPlan>>,
    fail_fetch: AtomicBool,
}

impl InMemoryPlanRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plan
    pub fn insert(&self, plan: WorkoutPlan) {
        lock_ignoring_poison(&self.plans).push(plan);
    }

    /// Make `active_plan_for_client` fail
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn active_plan_for_client(
        &self,
        client_id: Uuid,
    ) -> ScheduleResult<Option<WorkoutPlan>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ScheduleError::database("injected plan-fetch failure"));
        }
        let plans = lock_ignoring_poison(&self.plans);
        Ok(plans
            .iter()
            .filter(|p| p.client_id == client_id)
            .max_by_key(|p| (p.updated_at, p.id))
            .cloned())
    }
}

/// In-memory `TemplateResolver` backed by a map
#[derive(Default)]
pub struct InMemoryTemplateResolver {
    templates: Mutex<HashMap<Uuid, TemplateSummary>>,
    fail_resolve: AtomicBool,
}

impl InMemoryTemplateResolver {
    /// Empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template summary
    pub fn insert(&self, template: TemplateSummary) {
        lock_ignoring_poison(&self.templates).insert(template.id, template);
    }

    /// Make `resolve_template` fail
    pub fn set_fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TemplateResolver for InMemoryTemplateResolver {
    async fn resolve_template(
        &self,
        template_id: Uuid,
    ) -> ScheduleResult<Option<TemplateSummary>> {
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(ScheduleError::database("injected resolver failure"));
        }
        let templates = lock_ignoring_poison(&self.templates);
        Ok(templates.get(&template_id).cloned())
    }
}
