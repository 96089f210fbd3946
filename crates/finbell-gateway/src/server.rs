// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server exposing the gateway routes.
//!
//! `/health` is public. Everything under `/v1` sits behind the bearer
//! token middleware from [`crate::auth`].

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use finbell_core::FinbellError;
use finbell_notifier::NotificationBatch;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Listen address for the gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Process start marker used for the uptime report.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub started_at: Instant,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct GatewayState {
    pub batch: Arc<NotificationBatch>,
    pub auth: AuthConfig,
    pub health: HealthState,
}

/// Assembles the route tree.
///
/// Split out of [`start_server`] so the composition is reusable from
/// tests without binding a socket.
pub fn build_router(state: GatewayState) -> Router {
    let auth = state.auth.clone();

    let api_routes = Router::new()
        .route("/v1/notifications/run", post(handlers::post_run))
        .route_layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(handlers::get_health))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listen address and serves until the task is dropped.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), FinbellError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FinbellError::Gateway {
            message: format!("failed to bind gateway to {addr}"),
            source: Some(Box::new(e)),
        })?;

    info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| FinbellError::Gateway {
            message: "gateway server terminated".to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use finbell_config::model::{NotifierConfig, ServiceConfig};
    use finbell_core::{
        Bill, BillSource, MailSender, NewNotification, NotificationHistory, NotificationKind,
        OwnerId, RecordOutcome, RenderedEmail, UserDirectory,
    };
    use finbell_notifier::Renderer;

    struct NoBills;

    #[async_trait]
    impl BillSource for NoBills {
        async fn unpaid_bills(&self) -> Result<Vec<Bill>, FinbellError> {
            Ok(Vec::new())
        }
    }

    struct NoUsers;

    #[async_trait]
    impl UserDirectory for NoUsers {
        async fn email_for(&self, _owner_id: &OwnerId) -> Result<Option<String>, FinbellError> {
            Ok(None)
        }
    }

    struct NoHistory;

    #[async_trait]
    impl NotificationHistory for NoHistory {
        async fn exists(
            &self,
            _bill_id: &finbell_core::BillId,
            _kind: NotificationKind,
            _sent_on: NaiveDate,
        ) -> Result<bool, FinbellError> {
            Ok(false)
        }

        async fn record(
            &self,
            _notification: &NewNotification,
        ) -> Result<RecordOutcome, FinbellError> {
            Ok(RecordOutcome::Recorded)
        }
    }

    struct NullMailer;

    #[async_trait]
    impl MailSender for NullMailer {
        async fn send(&self, _to: &str, _email: &RenderedEmail) -> Result<(), FinbellError> {
            Ok(())
        }
    }

    fn empty_state() -> GatewayState {
        let renderer = Renderer::new(&ServiceConfig::default(), &NotifierConfig::default());
        let batch = NotificationBatch::new(
            Arc::new(NoBills),
            Arc::new(NoUsers),
            Arc::new(NoHistory),
            Arc::new(NullMailer),
            renderer,
        );
        GatewayState {
            batch: Arc::new(batch),
            auth: AuthConfig::new(Some("token".to_string())),
            health: HealthState::new(),
        }
    }

    #[test]
    fn router_builds_with_auth_configured() {
        let _router = build_router(empty_state());
    }

    #[tokio::test]
    async fn start_server_surfaces_bind_failures() {
        let config = ServerConfig {
            host: "256.256.256.256".to_string(),
            port: 1,
        };
        let err = start_server(&config, empty_state()).await.unwrap_err();
        match err {
            FinbellError::Gateway { message, .. } => {
                assert!(message.contains("failed to bind"), "got: {message}");
            }
            other => panic!("expected gateway error, got {other}"),
        }
    }

    #[test]
    fn health_state_tracks_elapsed_time() {
        let health = HealthState::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(health.started_at.elapsed().as_millis() >= 5);
    }
}
