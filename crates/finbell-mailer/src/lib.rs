// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP delivery for Finbell reminder emails.
//!
//! Wraps a `lettre` async transport behind the [`MailSender`] trait so the
//! notifier never touches SMTP details directly.
//!
//! [`MailSender`]: finbell_core::MailSender

pub mod smtp;

pub use smtp::SmtpMailer;
