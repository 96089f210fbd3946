// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types, errors, and trait contracts shared across Finbell.
//!
//! Every other crate in the workspace depends on this one. It carries no
//! I/O of its own: storage, mail, and HTTP live behind the traits in
//! [`traits`] so the notifier can be exercised against in-memory fakes.

pub mod error;
pub mod traits;
pub mod types;

pub use error::FinbellError;
pub use traits::{BillSource, MailSender, NotificationHistory, UserDirectory};
pub use types::{
    Bill, BillId, NewNotification, NotificationKind, NotificationRecord, OwnerId, RecordOutcome,
    RenderedEmail, RunSummary, RunTrigger,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn error_variants_render_their_context() {
        let err = FinbellError::Config("missing [smtp] section".into());
        assert_eq!(err.to_string(), "configuration error: missing [smtp] section");

        let err = FinbellError::Mail {
            message: "relay refused".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "mail error: relay refused");

        let err = FinbellError::Schedule("bad cron expression".into());
        assert!(err.to_string().contains("bad cron expression"));
    }

    #[test]
    fn notification_kind_round_trips_through_display() {
        for kind in [
            NotificationKind::TwoDaysBefore,
            NotificationKind::OneDayBefore,
            NotificationKind::DueToday,
            NotificationKind::Overdue,
        ] {
            let text = kind.to_string();
            let parsed = NotificationKind::from_str(&text).unwrap();
            assert_eq!(parsed, kind, "{text} did not round-trip");
        }

        assert_eq!(NotificationKind::TwoDaysBefore.to_string(), "two_days_before");
        assert_eq!(NotificationKind::Overdue.to_string(), "overdue");
        assert!(NotificationKind::from_str("next_week").is_err());
    }

    #[test]
    fn notification_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&NotificationKind::DueToday).unwrap();
        assert_eq!(json, "\"due_today\"");

        let kind: NotificationKind = serde_json::from_str("\"one_day_before\"").unwrap();
        assert_eq!(kind, NotificationKind::OneDayBefore);
    }

    #[test]
    fn run_trigger_serde_round_trip() {
        let json = serde_json::to_string(&RunTrigger::Manual).unwrap();
        assert_eq!(json, "\"manual\"");

        let trigger: RunTrigger = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(trigger, RunTrigger::Scheduled);
    }

    #[test]
    fn run_summary_message_pluralizes() {
        let summary = RunSummary {
            examined: 1,
            sent: 1,
            trigger: RunTrigger::Manual,
        };
        assert_eq!(summary.message(), "1 notification sent, 1 bill examined");

        let summary = RunSummary {
            examined: 12,
            sent: 0,
            trigger: RunTrigger::Scheduled,
        };
        assert_eq!(summary.message(), "0 notifications sent, 12 bills examined");
    }

    #[test]
    fn bill_holds_the_fields_the_batch_needs() {
        let bill = Bill {
            id: BillId("b-100".into()),
            owner_id: OwnerId("u-7".into()),
            name: "Rent".into(),
            amount_cents: 145_000,
            due_on: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            paid: false,
        };
        assert_eq!(bill.id.0, "b-100");
        assert!(!bill.paid);
    }

    #[test]
    fn traits_are_object_safe() {
        fn assert_obj<T: ?Sized>() {}
        assert_obj::<dyn BillSource>();
        assert_obj::<dyn UserDirectory>();
        assert_obj::<dyn NotificationHistory>();
        assert_obj::<dyn MailSender>();
    }
}
