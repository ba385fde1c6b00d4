//! # Approval Bridge Runtime
//!
//! The main entry point for the approval bridge process. Wires together:
//!
//! - the pending-approval ledger (ab-02), the single state owner
//! - the chain event bridge (ab-03), feeding quorum-approved transactions in
//! - the HTTP API gateway (ab-04), the administrator-facing surface
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `AB_*` environment variables
//! 3. Parse the administrator set (refuse to start without one)
//! 4. Start the chain event bridge and the API gateway
//! 5. Run until SIGINT, then signal shutdown and drain the tasks

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ab_02_pending_ledger::{ApprovalLedger, LoggingDispatcher};
use ab_03_chain_bridge::{ChainEventBridge, InMemoryConsensusFeed};
use ab_04_api_gateway::ApiGatewayService;
use bridge_runtime::BridgeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = BridgeConfig::from_env().context("Failed to load configuration")?;

    info!("===========================================");
    info!("  Approval Bridge v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let dispatcher = Arc::new(LoggingDispatcher::new());
    let ledger = ApprovalLedger::new(&config.ledger, dispatcher)
        .context("Failed to parse administrator set")?;
    info!(
        admins = ledger.admins().len(),
        auto_execute_delay = ?config.ledger.auto_execute_delay,
        "Pending ledger initialized"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Chain event bridge: quorum notifications from the consensus feed flow
    // into the ledger as pending submissions.
    let feed = Arc::new(InMemoryConsensusFeed::with_capacity(config.event_capacity));
    let bridge = ChainEventBridge::new(Arc::clone(&feed), ledger.clone());
    let bridge_handle = tokio::spawn(bridge.run(shutdown_rx.clone()));

    // HTTP API gateway.
    let gateway = ApiGatewayService::new(config.api, ledger.clone())
        .context("Failed to configure API gateway")?;
    let gateway_shutdown = shutdown_rx.clone();
    let mut gateway_handle = tokio::spawn(async move { gateway.start(gateway_shutdown).await });

    info!("Bridge is running. Press Ctrl+C to stop.");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
        result = &mut gateway_handle => {
            match result {
                Ok(Err(e)) => error!("API gateway stopped with error: {e}"),
                Ok(Ok(())) => info!("API gateway stopped"),
                Err(e) => error!("API gateway task panicked: {e}"),
            }
        }
    }

    // Flip the shutdown flag, cancel any scheduled auto-executions, and wait
    // for the tasks to drain.
    let _ = shutdown_tx.send(true);
    ledger.cancel_scheduled();
    if !gateway_handle.is_finished() {
        if let Ok(Err(e)) = gateway_handle.await {
            error!("API gateway shutdown error: {e}");
        }
    }
    let _ = bridge_handle.await;

    info!("Shutdown complete");
    Ok(())
}
