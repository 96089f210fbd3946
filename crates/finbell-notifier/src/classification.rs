// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Due-date classification.
//!
//! A bill qualifies for at most one reminder kind per day, decided purely
//! by the calendar distance between its due date and the run date.

use chrono::NaiveDate;
use finbell_core::types::NotificationKind;

/// The reminder a bill qualifies for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: NotificationKind,
    /// Days past due. Zero for every kind except [`NotificationKind::Overdue`].
    pub days_overdue: i64,
}

/// Classify a bill by its due date relative to `today`.
///
/// Returns `None` when the bill is outside the reminder window (due in
/// three or more days). Overdue bills qualify every day until paid.
pub fn classify(due_on: NaiveDate, today: NaiveDate) -> Option<Classification> {
    let days_until = (due_on - today).num_days();
    match days_until {
        2 => Some(Classification {
            kind: NotificationKind::TwoDaysBefore,
            days_overdue: 0,
        }),
        1 => Some(Classification {
            kind: NotificationKind::OneDayBefore,
            days_overdue: 0,
        }),
        0 => Some(Classification {
            kind: NotificationKind::DueToday,
            days_overdue: 0,
        }),
        d if d < 0 => Some(Classification {
            kind: NotificationKind::Overdue,
            days_overdue: -d,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_days_out_classifies_as_two_days_before() {
        let c = classify(date(2026, 3, 17), date(2026, 3, 15)).unwrap();
        assert_eq!(c.kind, NotificationKind::TwoDaysBefore);
        assert_eq!(c.days_overdue, 0);
    }

    #[test]
    fn one_day_out_classifies_as_one_day_before() {
        let c = classify(date(2026, 3, 16), date(2026, 3, 15)).unwrap();
        assert_eq!(c.kind, NotificationKind::OneDayBefore);
    }

    #[test]
    fn same_day_classifies_as_due_today() {
        let c = classify(date(2026, 3, 15), date(2026, 3, 15)).unwrap();
        assert_eq!(c.kind, NotificationKind::DueToday);
    }

    #[test]
    fn past_due_classifies_as_overdue_with_day_count() {
        let c = classify(date(2026, 3, 10), date(2026, 3, 15)).unwrap();
        assert_eq!(c.kind, NotificationKind::Overdue);
        assert_eq!(c.days_overdue, 5);
    }

    #[test]
    fn one_day_past_due_is_overdue_by_one() {
        let c = classify(date(2026, 3, 14), date(2026, 3, 15)).unwrap();
        assert_eq!(c.kind, NotificationKind::Overdue);
        assert_eq!(c.days_overdue, 1);
    }

    #[test]
    fn three_or_more_days_out_is_outside_the_window() {
        assert!(classify(date(2026, 3, 18), date(2026, 3, 15)).is_none());
        assert!(classify(date(2026, 4, 15), date(2026, 3, 15)).is_none());
    }

    #[test]
    fn classification_crosses_month_boundaries() {
        // Due March 1st, run on February 28th of a leap year: 2 days out.
        let c = classify(date(2024, 3, 1), date(2024, 2, 28)).unwrap();
        assert_eq!(c.kind, NotificationKind::TwoDaysBefore);
    }

    #[test]
    fn classification_crosses_year_boundaries() {
        let c = classify(date(2027, 1, 1), date(2026, 12, 31)).unwrap();
        assert_eq!(c.kind, NotificationKind::OneDayBefore);
    }
}
