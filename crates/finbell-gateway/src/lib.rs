// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for finbell.
//!
//! Exposes a public health probe and an authenticated endpoint for
//! triggering a notification run outside the schedule. The gateway is
//! optional; the daemon only starts it when enabled in configuration.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, HealthState, ServerConfig, start_server};
