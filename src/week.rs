// ABOUTME: Monday-start week construction from a reference date
// ABOUTME: Pure calendar math, no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the week containing `reference`.
///
/// A Sunday reference maps back six days to the preceding Monday.
#[must_use]
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    let offset = i64::from(reference.weekday().num_days_from_monday());
    reference - Duration::days(offset)
}

/// The seven consecutive dates of the week containing `reference`,
/// Monday first, Sunday last.
#[must_use]
pub fn week_dates(reference: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(reference);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_midweek_reference() {
        // 2025-03-12 is a Wednesday
        assert_eq!(week_start(date(2025, 3, 12)), date(2025, 3, 10));
    }

    #[test]
    fn test_monday_reference_is_its_own_start() {
        assert_eq!(week_start(date(2025, 3, 10)), date(2025, 3, 10));
    }

    #[test]
    fn test_sunday_maps_to_preceding_monday() {
        // 2025-03-16 is a Sunday
        assert_eq!(week_start(date(2025, 3, 16)), date(2025, 3, 10));
    }

    #[test]
    fn test_week_spans_year_boundary() {
        // 2026-01-01 is a Thursday; its week starts Monday 2025-12-29
        let dates = week_dates(date(2026, 1, 1));
        assert_eq!(dates[0], date(2025, 12, 29));
        assert_eq!(dates[6], date(2026, 1, 4));
    }

    #[test]
    fn test_week_properties_hold_for_a_range_of_dates() {
        let mut day = date(2025, 1, 1);
        for _ in 0..400 {
            let dates = week_dates(day);
            assert_eq!(dates[0].weekday(), Weekday::Mon);
            assert_eq!(dates[6].weekday(), Weekday::Sun);
            assert!(dates.contains(&day));
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            day = day + Duration::days(1);
        }
    }
}
