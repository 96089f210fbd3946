// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the gateway routes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use finbell_core::RunTrigger;

use crate::server::GatewayState;

/// Body of `POST /v1/notifications/run`.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    /// Whether the run is operator-initiated. Defaults to true; the
    /// scheduler never goes through this endpoint.
    #[serde(default = "default_manual")]
    pub manual: bool,
}

fn default_manual() -> bool {
    true
}

/// Successful run outcome.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,
    pub message: String,
    pub sent: usize,
    pub examined: usize,
    pub trigger: RunTrigger,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// `POST /v1/notifications/run`.
///
/// Kicks off a batch run for the current local date and reports the
/// summary. A fetch failure inside the batch surfaces as a 500; per-bill
/// failures are absorbed by the batch itself.
pub async fn post_run(
    State(state): State<GatewayState>,
    Json(body): Json<RunRequest>,
) -> Response {
    let trigger = if body.manual {
        RunTrigger::Manual
    } else {
        RunTrigger::Scheduled
    };
    let today = chrono::Local::now().date_naive();

    info!(%today, ?trigger, "run requested over the gateway");

    match state.batch.execute(today, trigger).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(RunResponse {
                success: true,
                message: summary.message(),
                sent: summary.sent,
                examined: summary.examined,
                trigger: summary.trigger,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "notification run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /health`.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.started_at.elapsed().as_secs(),
    })
}
