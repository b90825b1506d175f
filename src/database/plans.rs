// ABOUTME: Workout plan storage: active-plan lookup and plan creation
// ABOUTME: schedule_data is a JSON column read through parse_or_default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use super::sessions::{parse_timestamp, parse_uuid};
use super::Database;
use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{WeeklySchedule, WorkoutPlan};
use crate::parsing::parse_or_default;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_plans(&self) -> ScheduleResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                trainer_id TEXT NOT NULL,
                name TEXT NOT NULL,
                schedule_data TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create workout_plans: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_plans_client
            ON workout_plans(client_id, updated_at)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to index workout_plans: {e}")))?;

        Ok(())
    }

    /// The client's active plan: the most recently updated one, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn active_plan_for_client(
        &self,
        client_id: Uuid,
    ) -> ScheduleResult<Option<WorkoutPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, client_id, trainer_id, name, schedule_data, created_at, updated_at
            FROM workout_plans
            WHERE client_id = $1
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(client_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to fetch plan: {e}")))?;

        row.map(|r| row_to_plan(&r)).transpose()
    }

    /// Create a plan for a client
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub async fn create_plan(
        &self,
        client_id: Uuid,
        trainer_id: Uuid,
        name: &str,
        schedule_data: &WeeklySchedule,
    ) -> ScheduleResult<WorkoutPlan> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let schedule_json = serde_json::to_string(schedule_data)
            .map_err(|e| ScheduleError::invalid_data(format!("unserializable schedule: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO workout_plans (
                id, client_id, trainer_id, name, schedule_data, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(id.to_string())
        .bind(client_id.to_string())
        .bind(trainer_id.to_string())
        .bind(name)
        .bind(&schedule_json)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create plan: {e}")))?;

        Ok(WorkoutPlan {
            id,
            client_id,
            trainer_id,
            name: name.to_owned(),
            schedule_data: schedule_data.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

fn row_to_plan(row: &SqliteRow) -> ScheduleResult<WorkoutPlan> {
    let id_str: String = row.get("id");
    let client_id_str: String = row.get("client_id");
    let trainer_id_str: String = row.get("trainer_id");
    let schedule_json: Option<String> = row.get("schedule_data");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(WorkoutPlan {
        id: parse_uuid(&id_str, "id")?,
        client_id: parse_uuid(&client_id_str, "client_id")?,
        trainer_id: parse_uuid(&trainer_id_str, "trainer_id")?,
        name: row.get("name"),
        // Malformed schedule JSON degrades to an empty schedule
        schedule_data: parse_or_default(schedule_json.as_deref(), "workout_plans.schedule_data"),
        created_at: parse_timestamp(&created_at_str, "created_at")?,
        updated_at: parse_timestamp(&updated_at_str, "updated_at")?,
    })
}
