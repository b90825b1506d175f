// ABOUTME: Defensive parse-or-default utility for JSON configuration columns
// ABOUTME: Malformed or missing JSON falls back to the type's default with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Parse-or-default JSON handling.
//!
//! Persisted JSON columns (plan schedules, template exercise lists) can hold
//! malformed data written by older app versions. The policy is: missing,
//! empty, or unparseable JSON reads as the type's `Default`, with a warning
//! carrying the call-site context. Malformation is never an error.

use serde::de::DeserializeOwned;
use tracing::warn;

/// Parse JSON into `T`, falling back to `T::default()` on missing, empty, or
/// malformed input.
#[must_use]
pub fn parse_or_default<T>(raw: Option<&str>, context: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return T::default();
    };
    if raw.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(context, error = %err, "malformed JSON column; using default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeeklySchedule;

    #[test]
    fn test_valid_json_parses() {
        let schedule: WeeklySchedule = parse_or_default(
            Some(r#"{"Monday": "b2e1c7ce-8f4a-4d2b-9c3e-1a2b3c4d5e6f"}"#),
            "test",
        );
        assert!(schedule.monday.is_some());
    }

    #[test]
    fn test_missing_input_defaults() {
        let schedule: WeeklySchedule = parse_or_default(None, "test");
        assert_eq!(schedule, WeeklySchedule::default());
    }

    #[test]
    fn test_empty_string_defaults() {
        let schedule: WeeklySchedule = parse_or_default(Some("   "), "test");
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_malformed_json_defaults() {
        let schedule: WeeklySchedule = parse_or_default(Some("{not json"), "test");
        assert_eq!(schedule, WeeklySchedule::default());

        let exercises: Vec<String> = parse_or_default(Some("\"not an array\""), "test");
        assert!(exercises.is_empty());
    }

    #[test]
    fn test_wrong_shape_defaults() {
        // An array where an object is expected is malformed, not an error
        let schedule: WeeklySchedule = parse_or_default(Some("[1, 2, 3]"), "test");
        assert_eq!(schedule, WeeklySchedule::default());
    }
}
