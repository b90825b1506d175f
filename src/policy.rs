// ABOUTME: Day classification policy mapping a session and today into completed/missed flags
// ABOUTME: Pure function, no I/O; the rules are ordered and exhaustive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

//! Day classification policy.
//!
//! Maps an optional matched session plus "today" into one of four outcomes:
//! empty, upcoming, completed, or missed. Date-only comparison; time-of-day
//! is ignored. The overdue rule (rule 4) backstops the stale-session sweeper
//! for sessions read before a sweep succeeded.

use crate::models::{SessionStatus, TrainingSession};
use chrono::NaiveDate;

/// Classification outcome for one day of the week.
///
/// `completed` and `missed` are never both true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayOutcome {
    /// The day's session was completed
    pub completed: bool,
    /// The day's session was missed
    pub missed: bool,
}

impl DayOutcome {
    /// Empty or upcoming day
    pub const EMPTY: Self = Self {
        completed: false,
        missed: false,
    };
    /// Completed session
    pub const COMPLETED: Self = Self {
        completed: true,
        missed: false,
    };
    /// Missed session (no-show, cancelled, or overdue)
    pub const MISSED: Self = Self {
        completed: false,
        missed: true,
    };
}

/// Classify a day from its matched session (if any) and today's date.
///
/// Rules, in order:
/// 1. no session: empty
/// 2. completed: completed
/// 3. no-show or cancelled: missed
/// 4. scheduled with a past date: missed (sweeper backstop)
/// 5. scheduled today or later: upcoming (empty flags)
#[must_use]
pub fn classify(session: Option<&TrainingSession>, today: NaiveDate) -> DayOutcome {
    let Some(session) = session else {
        return DayOutcome::EMPTY;
    };
    match session.status {
        SessionStatus::Completed => DayOutcome::COMPLETED,
        SessionStatus::NoShow | SessionStatus::Cancelled => DayOutcome::MISSED,
        SessionStatus::Scheduled if session.scheduled_date < today => DayOutcome::MISSED,
        SessionStatus::Scheduled => DayOutcome::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_session;
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn session_on(date: NaiveDate, status: SessionStatus) -> TrainingSession {
        create_test_session(Uuid::new_v4(), date, status)
    }

    #[test]
    fn test_no_session_is_empty() {
        assert_eq!(classify(None, today()), DayOutcome::EMPTY);
    }

    #[test]
    fn test_completed_wins_regardless_of_date() {
        for offset in [-3_i64, 0, 3] {
            let s = session_on(today() + Duration::days(offset), SessionStatus::Completed);
            assert_eq!(classify(Some(&s), today()), DayOutcome::COMPLETED);
        }
    }

    #[test]
    fn test_no_show_and_cancelled_are_missed() {
        for status in [SessionStatus::NoShow, SessionStatus::Cancelled] {
            for offset in [-1_i64, 0, 1] {
                let s = session_on(today() + Duration::days(offset), status);
                assert_eq!(classify(Some(&s), today()), DayOutcome::MISSED);
            }
        }
    }

    #[test]
    fn test_scheduled_in_past_is_missed() {
        let s = session_on(today() - Duration::days(1), SessionStatus::Scheduled);
        assert_eq!(classify(Some(&s), today()), DayOutcome::MISSED);
    }

    #[test]
    fn test_scheduled_today_is_upcoming() {
        let s = session_on(today(), SessionStatus::Scheduled);
        assert_eq!(classify(Some(&s), today()), DayOutcome::EMPTY);
    }

    #[test]
    fn test_scheduled_future_is_upcoming() {
        let s = session_on(today() + Duration::days(4), SessionStatus::Scheduled);
        assert_eq!(classify(Some(&s), today()), DayOutcome::EMPTY);
    }

    #[test]
    fn test_completed_and_missed_never_both_true() {
        let dates = [
            today() - Duration::days(2),
            today(),
            today() + Duration::days(2),
        ];
        let statuses = [
            SessionStatus::Scheduled,
            SessionStatus::Completed,
            SessionStatus::NoShow,
            SessionStatus::Cancelled,
        ];
        for date in dates {
            for status in statuses {
                let s = session_on(date, status);
                let outcome = classify(Some(&s), today());
                assert!(!(outcome.completed && outcome.missed));
            }
        }
    }
}
