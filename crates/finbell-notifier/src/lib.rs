// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Due-date classification, email templates, and the daily batch run.
//!
//! The crate is pure domain logic: it talks to storage and SMTP only
//! through the trait objects in `finbell-core`, which keeps every piece
//! testable without a database or a relay.

pub mod batch;
pub mod classification;
pub mod template;

pub use batch::NotificationBatch;
pub use classification::{classify, Classification};
pub use template::Renderer;
