//! Curation window arithmetic

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{WINDOW_END_OFFSET_DAYS, WINDOW_START_OFFSET_DAYS};

/// The span during which a curator publishes their playlist.
///
/// Half-open: `start_date` is the first day, `end_date` the first day after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurationWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CurationWindow {
    /// Whether two windows share at least one day
    pub fn overlaps(&self, other: &CurationWindow) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }

    /// Number of days covered
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

impl fmt::Display for CurationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_date, self.end_date)
    }
}

/// Window for a curator notified on `assignment_date`
pub fn compute_window(assignment_date: NaiveDate) -> CurationWindow {
    CurationWindow {
        start_date: assignment_date + Duration::days(WINDOW_START_OFFSET_DAYS),
        end_date: assignment_date + Duration::days(WINDOW_END_OFFSET_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compute_window_offsets() {
        let window = compute_window(date(2024, 1, 1));
        assert_eq!(window.start_date, date(2024, 1, 4));
        assert_eq!(window.end_date, date(2024, 1, 11));
        assert_eq!(window.len_days(), 7);
    }

    #[test]
    fn test_compute_window_across_month_and_leap_day() {
        let window = compute_window(date(2024, 2, 25));
        assert_eq!(window.start_date, date(2024, 2, 28));
        assert_eq!(window.end_date, date(2024, 3, 6));

        let window = compute_window(date(2023, 12, 28));
        assert_eq!(window.start_date, date(2023, 12, 31));
        assert_eq!(window.end_date, date(2024, 1, 7));
    }

    #[test]
    fn test_every_day_of_a_year() {
        let mut day = date(2024, 1, 1);
        while day < date(2025, 1, 1) {
            let window = compute_window(day);
            assert_eq!(window.start_date, day + Duration::days(3));
            assert_eq!(window.end_date, day + Duration::days(10));
            assert!(window.start_date < window.end_date);
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        let first = compute_window(date(2024, 1, 1));
        let next = compute_window(date(2024, 1, 8));
        assert_eq!(first.end_date, next.start_date);
        assert!(!first.overlaps(&next));
        assert!(!next.overlaps(&first));

        let shifted = compute_window(date(2024, 1, 7));
        assert!(first.overlaps(&shifted));
    }

    #[test]
    fn test_display_is_half_open() {
        let window = compute_window(date(2024, 1, 1));
        assert_eq!(window.to_string(), "[2024-01-04, 2024-01-11)");
    }
}
