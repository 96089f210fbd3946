// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for finbell integration tests.
//!
//! Provides a mock mailer and a test harness for fast, deterministic,
//! CI-runnable tests without an SMTP server.
//!
//! # Components
//!
//! - [`MockMailer`] - captures outbound email, with per-recipient failure scripting
//! - [`TestHarness`] - full batch stack over a temp SQLite database

pub mod harness;
pub mod mock_mailer;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_mailer::{MockMailer, SentEmail};
