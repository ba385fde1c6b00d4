//! HTTP server lifecycle.

use crate::domain::config::ApiConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use ab_02_pending_ledger::ApprovalLedger;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// The API gateway service: owns the validated configuration and builds the
/// router over the shared ledger. `start` runs the server until the shutdown
/// signal flips.
pub struct ApiGatewayService {
    config: ApiConfig,
    ledger: ApprovalLedger,
}

impl ApiGatewayService {
    /// Create the service, validating the configuration up front.
    pub fn new(config: ApiConfig, ledger: ApprovalLedger) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, ledger })
    }

    /// Build the router without binding a socket. Used by in-process tests.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(self.ledger.clone(), &self.config)
    }

    /// Bind and serve until `shutdown` observes `true`.
    pub async fn start(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), GatewayError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;

        info!(%addr, admins = self.ledger.admins().len(), "API gateway listening");
        info!("  POST /api/transactions/submit");
        info!("  GET  /api/transactions/pending");
        info!("  POST /api/transactions/approve");
        info!("  POST /api/transactions/execute");
        info!("  GET  /api/transactions/{{id}}/status");
        info!("  GET  /api/admin/nonce/{{address}}");
        info!("  GET  /api/admin/config");
        info!("  GET  /health");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                // Either a flipped flag or a dropped sender stops the server.
                while !*shutdown.borrow_and_update() {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                }
                info!("API gateway shutting down");
            })
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))
    }
}
