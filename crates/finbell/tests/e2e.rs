// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete notification pipeline.
//!
//! Each test creates an isolated TestHarness with a temp SQLite database
//! and a mock mailer. Tests are independent and order-insensitive.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use finbell_core::{NotificationKind, RunTrigger};
use finbell_test_utils::TestHarness;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---- Test 1: Notification window ----

#[tokio::test]
async fn test_only_bills_inside_the_window_are_notified() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-plus3", "u-1", "Too early", 1_000, today + Duration::days(3))
        .await
        .unwrap();
    harness
        .seed_bill("b-plus2", "u-1", "Two days out", 1_000, today + Duration::days(2))
        .await
        .unwrap();
    harness
        .seed_bill("b-plus1", "u-1", "Tomorrow", 1_000, today + Duration::days(1))
        .await
        .unwrap();
    harness
        .seed_bill("b-today", "u-1", "Today", 1_000, today)
        .await
        .unwrap();
    harness
        .seed_bill("b-overdue", "u-1", "Late", 1_000, today - Duration::days(4))
        .await
        .unwrap();

    let summary = harness.run_on(today).await.unwrap();
    assert_eq!(summary.examined, 5);
    assert_eq!(summary.sent, 4, "bill due in 3 days must not be notified");

    assert!(harness.history("b-plus3").await.unwrap().is_empty());
    assert_eq!(harness.history("b-plus2").await.unwrap().len(), 1);
    assert_eq!(harness.history("b-overdue").await.unwrap().len(), 1);
}

// ---- Test 2: Same-day idempotency ----

#[tokio::test]
async fn test_rerunning_the_same_day_is_idempotent() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Rent", 120_000, today)
        .await
        .unwrap();

    let first = harness.run_on(today).await.unwrap();
    assert_eq!(first.sent, 1);

    let second = harness.run_on(today).await.unwrap();
    assert_eq!(second.examined, 1);
    assert_eq!(second.sent, 0, "dedup must stop the second send");

    assert_eq!(harness.mailer.count().await, 1);
    assert_eq!(harness.history("b-1").await.unwrap().len(), 1);
}

// ---- Test 3: Overdue bills notify daily ----

#[tokio::test]
async fn test_overdue_bills_notify_again_each_day() {
    let harness = TestHarness::builder().build().await.unwrap();
    let due = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Electricity", 9_900, due)
        .await
        .unwrap();

    let day_one = harness.run_on(due + Duration::days(1)).await.unwrap();
    let day_two = harness.run_on(due + Duration::days(2)).await.unwrap();
    assert_eq!(day_one.sent, 1);
    assert_eq!(day_two.sent, 1);

    let sent = harness.mailer.sent().await;
    assert_eq!(sent.len(), 2);
    assert!(sent[0].subject.contains("1 day past due"), "got: {}", sent[0].subject);
    assert!(sent[1].subject.contains("2 days past due"), "got: {}", sent[1].subject);

    let history = harness.history("b-1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|r| r.kind == NotificationKind::Overdue));
    assert_ne!(history[0].sent_on, history[1].sent_on);
}

// ---- Test 4: Paid bills are excluded ----

#[tokio::test]
async fn test_paid_bills_never_enter_a_run() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Water", 4_500, today)
        .await
        .unwrap();
    harness.mark_paid("b-1").await.unwrap();

    let summary = harness.run_on(today).await.unwrap();
    assert_eq!(summary.examined, 0);
    assert_eq!(summary.sent, 0);
    assert_eq!(harness.mailer.count().await, 0);
}

// ---- Test 5: Missing recipient addresses ----

#[tokio::test]
async fn test_user_without_email_is_examined_but_skipped() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", None).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Internet", 8_990, today)
        .await
        .unwrap();

    let summary = harness.run_on(today).await.unwrap();
    assert_eq!(summary.examined, 1);
    assert_eq!(summary.sent, 0);
    assert!(
        harness.history("b-1").await.unwrap().is_empty(),
        "a skipped bill must leave no history"
    );
}

#[tokio::test]
async fn test_unknown_owner_is_examined_but_skipped() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    // No user row at all for u-ghost.
    harness
        .seed_bill("b-1", "u-ghost", "Phone", 3_500, today)
        .await
        .unwrap();

    let summary = harness.run_on(today).await.unwrap();
    assert_eq!(summary.examined, 1);
    assert_eq!(summary.sent, 0);
}

// ---- Test 6: Failure isolation and retry ----

#[tokio::test]
async fn test_mailer_failure_skips_only_the_affected_bill() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-ok", Some("ok@example.com")).await.unwrap();
    harness.seed_user("u-down", Some("down@example.com")).await.unwrap();
    harness
        .seed_bill("b-ok", "u-ok", "Rent", 120_000, today)
        .await
        .unwrap();
    harness
        .seed_bill("b-down", "u-down", "Gas", 6_200, today)
        .await
        .unwrap();
    harness.mailer.fail_for("down@example.com").await;

    let summary = harness.run_on(today).await.unwrap();
    assert_eq!(summary.examined, 2);
    assert_eq!(summary.sent, 1, "the healthy bill must still go out");
    assert!(harness.history("b-down").await.unwrap().is_empty());

    // Once the recipient recovers, a rerun picks up only the failed bill.
    harness.mailer.clear_failures().await;
    let retry = harness.run_on(today).await.unwrap();
    assert_eq!(retry.sent, 1);
    assert_eq!(harness.history("b-ok").await.unwrap().len(), 1);
    assert_eq!(harness.history("b-down").await.unwrap().len(), 1);
}

// ---- Test 7: Kind progression over the bill's lifetime ----

#[tokio::test]
async fn test_one_bill_progresses_through_every_kind() {
    let harness = TestHarness::builder().build().await.unwrap();
    let due = date(2026, 3, 12);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Card", 54_321, due)
        .await
        .unwrap();

    for offset in -2..=2 {
        let summary = harness.run_on(due + Duration::days(offset)).await.unwrap();
        assert_eq!(summary.sent, 1, "offset {offset} should send");
    }

    let kinds: Vec<NotificationKind> = harness
        .history("b-1")
        .await
        .unwrap()
        .iter()
        .map(|r| r.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::TwoDaysBefore,
            NotificationKind::OneDayBefore,
            NotificationKind::DueToday,
            NotificationKind::Overdue,
            NotificationKind::Overdue,
        ]
    );
}

// ---- Test 8: Triggers and summary text ----

#[tokio::test]
async fn test_manual_trigger_is_reported_in_the_summary() {
    let harness = TestHarness::builder().build().await.unwrap();
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Rent", 120_000, today)
        .await
        .unwrap();

    let summary = harness.run_manual_on(today).await.unwrap();
    assert_eq!(summary.trigger, RunTrigger::Manual);
    assert_eq!(summary.message(), "1 notification sent, 1 bill examined");
}

// ---- Test 9: Concurrent runs record once ----

#[tokio::test]
async fn test_concurrent_runs_record_exactly_one_row() {
    let harness = Arc::new(TestHarness::builder().build().await.unwrap());
    let today = date(2026, 3, 10);

    harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
    harness
        .seed_bill("b-1", "u-1", "Rent", 120_000, today)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let h = harness.clone();
        handles.push(tokio::spawn(async move { h.run_on(today).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Racing runs may each push an email, but the history holds one row.
    assert_eq!(harness.history("b-1").await.unwrap().len(), 1);
}
