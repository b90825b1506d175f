// ABOUTME: Core domain types for training sessions, plans, templates, and weekly views
// ABOUTME: Defines SessionStatus, TrainingSession, WorkoutPlan, WeeklySchedule, WeekDayView
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Domain model for the scheduling core.
//!
//! `TrainingSession` and `WorkoutPlan` mirror the persisted entities owned by
//! the surrounding system; `WeekDayView` is the derived, non-persisted
//! projection the reconciler hands to the presentation layer.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Lifecycle status of a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Assigned to a date, not yet resolved either way
    #[default]
    Scheduled,
    /// The client completed the workout
    Completed,
    /// The scheduled date passed without the session happening
    NoShow,
    /// Explicitly cancelled by trainer or client
    Cancelled,
}

impl SessionStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from database string representation.
    ///
    /// Returns `None` for unknown strings so callers can treat malformed rows
    /// as absent instead of misclassifying them.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "no_show" => Some(Self::NoShow),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A single calendar-dated workout assignment for one client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Client this session belongs to
    pub client_id: Uuid,
    /// Trainer who assigned the session
    pub trainer_id: Uuid,
    /// Workout template backing the session; `None` for freeform sessions
    pub template_id: Option<Uuid>,
    /// Recurring plan this session was materialized from, if any
    pub plan_id: Option<Uuid>,
    /// Calendar date the session is assigned to (date matching ignores time)
    pub scheduled_date: NaiveDate,
    /// Optional time-of-day label, e.g. "07:30"
    pub scheduled_time: Option<String>,
    /// Lifecycle status
    pub status: SessionStatus,
    /// Planned duration in minutes
    pub duration_minutes: Option<u32>,
    /// Free-form session type label, e.g. "strength"
    pub session_type: Option<String>,
    /// Where the session takes place
    pub location: Option<String>,
    /// Trainer notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; the tie-break key when two rows share a date
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to materialize a new session row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Client the session is assigned to
    pub client_id: Uuid,
    /// Trainer assigning the session
    pub trainer_id: Uuid,
    /// Workout template to use, if any
    #[serde(default)]
    pub template_id: Option<Uuid>,
    /// Recurring plan the session is materialized from, if any
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    /// Calendar date to schedule
    pub scheduled_date: NaiveDate,
    /// Optional time-of-day label
    #[serde(default)]
    pub scheduled_time: Option<String>,
    /// Planned duration in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Free-form session type label
    #[serde(default)]
    pub session_type: Option<String>,
    /// Where the session takes place
    #[serde(default)]
    pub location: Option<String>,
    /// Trainer notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Recurring weekly intent: which template is assigned to each weekday.
///
/// Entries hold raw strings as persisted; syntactic validation happens in
/// [`WeeklySchedule::template_for`] so malformed entries are tolerated and
/// simply read as "no workout planned".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WeeklySchedule {
    /// Template id string for Monday, if any
    pub monday: Option<String>,
    /// Template id string for Tuesday, if any
    pub tuesday: Option<String>,
    /// Template id string for Wednesday, if any
    pub wednesday: Option<String>,
    /// Template id string for Thursday, if any
    pub thursday: Option<String>,
    /// Template id string for Friday, if any
    pub friday: Option<String>,
    /// Template id string for Saturday, if any
    pub saturday: Option<String>,
    /// Template id string for Sunday, if any
    pub sunday: Option<String>,
}

impl WeeklySchedule {
    /// Raw entry for a weekday, exactly as persisted
    #[must_use]
    pub fn entry(&self, weekday: Weekday) -> Option<&str> {
        let raw = match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        };
        raw.as_deref()
    }

    /// Syntactically valid template id for a weekday.
    ///
    /// Entries that are not UUID-shaped are ignored, never an error.
    #[must_use]
    pub fn template_for(&self, weekday: Weekday) -> Option<Uuid> {
        self.entry(weekday)
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
    }

    /// True when no weekday has an entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monday.is_none()
            && self.tuesday.is_none()
            && self.wednesday.is_none()
            && self.thursday.is_none()
            && self.friday.is_none()
            && self.saturday.is_none()
            && self.sunday.is_none()
    }
}

/// A recurring weekly template-assignment plan, distinct from materialized sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Unique identifier
    pub id: Uuid,
    /// Client the plan is for
    pub client_id: Uuid,
    /// Trainer who authored the plan
    pub trainer_id: Uuid,
    /// Display name
    pub name: String,
    /// Weekday-to-template mapping
    pub schedule_data: WeeklySchedule,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; the most recently updated plan is the active one
    pub updated_at: DateTime<Utc>,
}

/// Read projection of a workout template, as consumed by the weekly view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Template identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Number of exercises in the template
    pub exercise_count: u32,
    /// Estimated total duration in minutes
    pub estimated_duration_minutes: u32,
}

/// One day of the derived weekly view handed to the presentation layer.
///
/// `completed` and `missed` are mutually exclusive; both false means the day
/// is either empty or upcoming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekDayView {
    /// Short weekday label, e.g. "Mon"
    pub day_name: String,
    /// Day of month
    pub day_number: u32,
    /// ISO `YYYY-MM-DD` date string
    pub date: String,
    /// Resolved template summary, from the session or the plan fallback
    pub template: Option<TemplateSummary>,
    /// The session on this day was completed
    pub completed: bool,
    /// The session on this day was missed (no-show, cancelled, or overdue)
    pub missed: bool,
    /// Present only when a persisted session row matched this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    /// Time-of-day label carried from the matched session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

impl WeekDayView {
    /// Empty rest-day view for a date, with no session and no template
    #[must_use]
    pub fn rest_day(date: NaiveDate) -> Self {
        Self {
            day_name: weekday_label(date.weekday()).to_owned(),
            day_number: date.day(),
            date: date.format("%Y-%m-%d").to_string(),
            template: None,
            completed: false,
            missed: false,
            session_id: None,
            scheduled_time: None,
        }
    }
}

/// Short display label for a weekday
#[must_use]
pub const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Completed,
            SessionStatus::NoShow,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(SessionStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_unknown_string_is_none() {
        assert_eq!(SessionStatus::parse("noshow"), None);
        assert_eq!(SessionStatus::parse(""), None);
        assert_eq!(SessionStatus::parse("SCHEDULED"), None);
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&SessionStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
    }

    #[test]
    fn test_schedule_deserializes_weekday_names() {
        let schedule: WeeklySchedule = serde_json::from_str(
            r#"{"Monday": "b2e1c7ce-8f4a-4d2b-9c3e-1a2b3c4d5e6f", "Tuesday": null}"#,
        )
        .unwrap();
        assert!(schedule.monday.is_some());
        assert!(schedule.tuesday.is_none());
        assert!(schedule.wednesday.is_none());
    }

    #[test]
    fn test_template_for_validates_uuid_shape() {
        let schedule = WeeklySchedule {
            monday: Some("b2e1c7ce-8f4a-4d2b-9c3e-1a2b3c4d5e6f".to_owned()),
            tuesday: Some("legs-day".to_owned()),
            wednesday: Some(String::new()),
            ..WeeklySchedule::default()
        };
        assert!(schedule.template_for(Weekday::Mon).is_some());
        assert!(schedule.template_for(Weekday::Tue).is_none());
        assert!(schedule.template_for(Weekday::Wed).is_none());
        assert!(schedule.template_for(Weekday::Thu).is_none());
    }

    #[test]
    fn test_rest_day_defaults() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let day = WeekDayView::rest_day(date);
        assert_eq!(day.day_name, "Wed");
        assert_eq!(day.day_number, 12);
        assert_eq!(day.date, "2025-03-12");
        assert!(!day.completed);
        assert!(!day.missed);
        assert!(day.session_id.is_none());
        assert!(day.template.is_none());
    }
}
