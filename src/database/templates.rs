// ABOUTME: Workout template storage and summary resolution
// ABOUTME: Exercise lists are a JSON column; the summary exposes count and duration only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use super::sessions::parse_uuid;
use super::Database;
use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::TemplateSummary;
use crate::parsing::parse_or_default;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_templates(&self) -> ScheduleResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_templates (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                exercises TEXT NOT NULL DEFAULT '[]',
                estimated_duration_minutes INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create workout_templates: {e}")))?;

        Ok(())
    }

    /// Resolve a template id to its summary; `None` when unknown
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_template(&self, template_id: Uuid) -> ScheduleResult<Option<TemplateSummary>> {
        let row = sqlx::query(
            r"
            SELECT id, name, exercises, estimated_duration_minutes
            FROM workout_templates
            WHERE id = $1
            ",
        )
        .bind(template_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to fetch template: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id_str: String = row.get("id");
        let exercises_json: Option<String> = row.get("exercises");
        let duration: i64 = row.get("estimated_duration_minutes");
        // A malformed exercise list reads as empty rather than failing the day
        let exercises: Vec<serde_json::Value> =
            parse_or_default(exercises_json.as_deref(), "workout_templates.exercises");

        Ok(Some(TemplateSummary {
            id: parse_uuid(&id_str, "id")?,
            name: row.get("name"),
            exercise_count: exercises.len() as u32,
            estimated_duration_minutes: u32::try_from(duration).unwrap_or(0),
        }))
    }

    /// Create a template with the given exercise names
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub async fn create_template(
        &self,
        name: &str,
        exercises: &[String],
        estimated_duration_minutes: u32,
    ) -> ScheduleResult<TemplateSummary> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let exercises_json = serde_json::to_string(exercises)
            .map_err(|e| ScheduleError::invalid_data(format!("unserializable exercises: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO workout_templates (
                id, name, exercises, estimated_duration_minutes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(id.to_string())
        .bind(name)
        .bind(&exercises_json)
        .bind(i64::from(estimated_duration_minutes))
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::database(format!("failed to create template: {e}")))?;

        Ok(TemplateSummary {
            id,
            name: name.to_owned(),
            exercise_count: exercises.len() as u32,
            estimated_duration_minutes,
        })
    }
}
