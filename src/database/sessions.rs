// ABOUTME: Training session queries: range fetch, stale select, bulk no_show update, insert
// ABOUTME: Malformed rows are skipped with a warning instead of failing the query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use super::Database;
use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{CreateSessionRequest, SessionStatus, TrainingSession};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::warn;
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, client_id, trainer_id, template_id, plan_id, \
     scheduled_date, scheduled_time, status, duration_minutes, session_type, \
     location, notes, created_at, updated_at";

impl Database {
    pub(super) async fn migrate_sessions(&self) -> ScheduleResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_sessions (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                trainer_id TEXT NOT NULL,
                template_id TEXT,
                plan_id TEXT,
                scheduled_date TEXT NOT NULL,
                scheduled_time TEXT,
                status TEXT NOT NULL DEFAULT 'scheduled' CHECK (status IN ('scheduled', 'completed', 'no_show', 'cancelled')),
                duration_minutes INTEGER,
                session_type TEXT,
                location TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create training_sessions: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_training_sessions_client_date
            ON training_sessions(client_id, scheduled_date)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to index training_sessions: {e}")))?;

        Ok(())
    }

    /// Sessions for a client with `start <= scheduled_date <= end`, ordered
    /// by date then most recently updated first so tie-breaks are stable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sessions_in_range(
        &self,
        client_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions \
             WHERE client_id = $1 AND scheduled_date >= $2 AND scheduled_date <= $3 \
             ORDER BY scheduled_date ASC, updated_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(client_id.to_string())
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ScheduleError::database(format!("failed to fetch sessions: {e}")))?;

        Ok(map_session_rows(&rows))
    }

    /// Sessions still `scheduled` with a date strictly before `today`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn stale_scheduled_sessions(
        &self,
        client_id: Uuid,
        today: NaiveDate,
    ) -> ScheduleResult<Vec<TrainingSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions \
             WHERE client_id = $1 AND status = 'scheduled' AND scheduled_date < $2 \
             ORDER BY scheduled_date ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(client_id.to_string())
            .bind(today.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ScheduleError::database(format!("failed to fetch stale sessions: {e}")))?;

        Ok(map_session_rows(&rows))
    }

    /// Bulk-transition sessions to `no_show`, stamping `updated_at`.
    ///
    /// The `status = 'scheduled'` guard makes the update conditional, so only
    /// scheduled rows transition and repeating the call is safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn mark_sessions_no_show(&self, session_ids: &[Uuid]) -> ScheduleResult<u64> {
        if session_ids.is_empty() {
            return Ok(0);
        }

        let placeholders = (0..session_ids.len())
            .map(|i| format!("${}", i + 3))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE training_sessions SET status = $1, updated_at = $2 \
             WHERE status = 'scheduled' AND id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql)
            .bind(SessionStatus::NoShow.as_str())
            .bind(Utc::now().to_rfc3339());
        for id in session_ids {
            query = query.bind(id.to_string());
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| ScheduleError::database(format!("failed to mark no_show: {e}")))?;
        Ok(result.rows_affected())
    }

    /// Materialize a new session row in `scheduled` status
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_session(
        &self,
        request: &CreateSessionRequest,
    ) -> ScheduleResult<TrainingSession> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO training_sessions (
                id, client_id, trainer_id, template_id, plan_id,
                scheduled_date, scheduled_time, status, duration_minutes,
                session_type, location, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            ",
        )
        .bind(id.to_string())
        .bind(request.client_id.to_string())
        .bind(request.trainer_id.to_string())
        .bind(request.template_id.map(|t| t.to_string()))
        .bind(request.plan_id.map(|p| p.to_string()))
        .bind(request.scheduled_date.to_string())
        .bind(&request.scheduled_time)
        .bind(SessionStatus::Scheduled.as_str())
        .bind(request.duration_minutes.map(i64::from))
        .bind(&request.session_type)
        .bind(&request.location)
        .bind(&request.notes)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create session: {e}")))?;

        Ok(TrainingSession {
            id,
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
        })
    }
}

/// Map rows, skipping malformed ones with a warning. A row the mapper cannot
/// read is treated as absent, per the degradation policy.
fn map_session_rows(rows: &[SqliteRow]) -> Vec<TrainingSession> {
    rows.iter()
        .filter_map(|row| match row_to_session(row) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "skipping malformed training_sessions row");
                None
            }
        })
        .collect()
}

fn row_to_session(row: &SqliteRow) -> ScheduleResult<TrainingSession> {
    let id_str: String = row.get("id");
    let client_id_str: String = row.get("client_id");
    let trainer_id_str: String = row.get("trainer_id");
    let template_id_str: Option<String> = row.get("template_id");
    let plan_id_str: Option<String> = row.get("plan_id");
    let date_str: String = row.get("scheduled_date");
    let status_str: String = row.get("status");
    let duration: Option<i64> = row.get("duration_minutes");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let status = SessionStatus::parse(&status_str)
        .ok_or_else(|| ScheduleError::invalid_data(format!("unknown status: {status_str}")))?;
    let scheduled_date = date_str
        .parse::<NaiveDate>()
        .map_err(|e| ScheduleError::invalid_data(format!("bad scheduled_date: {e}")))?;

    Ok(TrainingSession {
        id: parse_uuid(&id_str, "id")?,
        client_id: parse_uuid(&client_id_str, "client_id")?,
        trainer_id: parse_uuid(&trainer_id_str, "trainer_id")?,
        // Invalid optional references read as absent, not as errors
        template_id: template_id_str.and_then(|s| Uuid::parse_str(&s).ok()),
        plan_id: plan_id_str.and_then(|s| Uuid::parse_str(&s).ok()),
        scheduled_date,
        scheduled_time: row.get("scheduled_time"),
        status,
        duration_minutes: duration.and_then(|d| u32::try_from(d).ok()),
        session_type: row.get("session_type"),
        location: row.get("location"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at_str, "created_at")?,
        updated_at: parse_timestamp(&updated_at_str, "updated_at")?,
    })
}

pub(super) fn parse_uuid(raw: &str, column: &str) -> ScheduleResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| ScheduleError::invalid_data(format!("bad uuid in {column}: {e}")))
}

pub(super) fn parse_timestamp(raw: &str, column: &str) -> ScheduleResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ScheduleError::invalid_data(format!("bad timestamp in {column}: {e}")))
}
