// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token authentication for the gateway API routes.
//!
//! The gateway is fail-closed: if no token is configured, every request
//! to a protected route is rejected. The health endpoint is mounted
//! outside this middleware and stays reachable for probes.

use std::fmt;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

/// Authentication settings shared with the middleware via router state.
#[derive(Clone)]
pub struct AuthConfig {
    /// Static bearer token expected in the `Authorization` header.
    pub bearer_token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl AuthConfig {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self { bearer_token }
    }
}

/// Middleware guarding the API routes.
///
/// Requests must carry `Authorization: Bearer <token>` matching the
/// configured token exactly. Missing configuration rejects everything.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth.bearer_token.as_deref() else {
        error!("no bearer token configured, rejecting request");
        return (StatusCode::UNAUTHORIZED, "authentication not configured").into_response();
    };

    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(header) = header else {
        warn!("request missing authorization header");
        return (StatusCode::UNAUTHORIZED, "missing authorization header").into_response();
    };

    let Some(presented) = header.strip_prefix("Bearer ") else {
        warn!("authorization header is not a bearer token");
        return (StatusCode::UNAUTHORIZED, "invalid authorization header").into_response();
    };

    if presented != expected {
        warn!("bearer token mismatch");
        return (StatusCode::UNAUTHORIZED, "invalid bearer token").into_response();
    }

    debug!("bearer token accepted");
    next.run(request).await
}
