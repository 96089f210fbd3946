// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the notification batch.
//!
//! The batch runner depends only on these traits; the SQLite store and the
//! SMTP mailer implement them, and tests substitute mocks. All traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod directory;
pub mod history;
pub mod mailer;
pub mod source;

// Re-export all traits at the traits module level for convenience.
pub use directory::UserDirectory;
pub use history::NotificationHistory;
pub use mailer::MailSender;
pub use source::BillSource;
