//! Route table and request handlers.
//!
//! Handlers validate field presence, delegate to the ledger, and translate
//! [`LedgerError`](ab_02_pending_ledger::LedgerError) into the stable error
//! envelope. Nothing here holds state of its own; the ledger is the single
//! entry point shared with the chain event bridge.

use crate::domain::config::ApiConfig;
use crate::domain::dto::{
    AdminConfigResponse, DecideRequest, DecisionResponse, ExecuteRequest, ExecuteResponse,
    NonceResponse, PendingListResponse, SubmitRequest, SubmitResponse,
};
use crate::domain::error::ApiError;
use ab_02_pending_ledger::{ApprovalLedger, BridgeTransaction, Decision};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared_types::{EthAddress, TransactionId};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The pending-approval ledger.
    pub ledger: ApprovalLedger,
}

/// Build the gateway router.
pub fn build_router(ledger: ApprovalLedger, config: &ApiConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout));

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/transactions/submit", post(submit_transaction))
        .route("/api/transactions/pending", get(list_pending))
        .route("/api/transactions/approve", post(decide_transaction))
        .route("/api/transactions/execute", post(execute_transaction))
        .route("/api/transactions/:id/status", get(transaction_status))
        .route("/api/admin/nonce/:address", get(admin_nonce))
        .route("/api/admin/config", get(admin_config))
        .layer(middleware)
        .with_state(AppState { ledger });

    if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// `POST /api/transactions/submit`
async fn submit_transaction(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let outcome = state.ledger.submit(request.into_draft())?;
    let message = if outcome.created {
        // The original system paged an administrator here; the log line is
        // the notification channel.
        info!(
            transaction_id = %outcome.id,
            "Transaction awaiting admin approval"
        );
        "transaction staged for admin approval".to_string()
    } else {
        "transaction already submitted".to_string()
    };
    Ok(Json(SubmitResponse {
        success: true,
        message,
        transaction_id: outcome.id,
        state: outcome.state,
    }))
}

/// `GET /api/transactions/pending`
async fn list_pending(State(state): State<AppState>) -> Json<PendingListResponse> {
    let transactions = state.ledger.list_pending();
    Json(PendingListResponse {
        count: transactions.len(),
        transactions,
    })
}

/// `POST /api/transactions/approve`
async fn decide_transaction(
    State(state): State<AppState>,
    Json(request): Json<DecideRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let (id, signer, signature, decision) = request.parse()?;
    let outcome = state.ledger.decide(&id, &signer, &signature, decision)?;
    let message = match decision {
        Decision::Approve => "transaction approved; execution scheduled".to_string(),
        Decision::Reject => "transaction rejected".to_string(),
    };
    Ok(Json(DecisionResponse {
        success: true,
        message,
        transaction_id: outcome.id,
        state: outcome.state,
        next_nonce: outcome.next_nonce,
    }))
}

/// `POST /api/transactions/execute`
async fn execute_transaction(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    if request.id.is_empty() {
        return Err(ApiError::validation("id is required"));
    }
    let id = TransactionId::new(request.id);
    let outcome = state.ledger.execute(&id).await?;
    let message = if outcome.already_executed {
        "transaction was already executed".to_string()
    } else {
        "transaction executed".to_string()
    };
    Ok(Json(ExecuteResponse {
        success: true,
        message,
        transaction_id: outcome.id,
        state: outcome.state,
        already_executed: outcome.already_executed,
    }))
}

/// `GET /api/transactions/{id}/status`
async fn transaction_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BridgeTransaction>, ApiError> {
    let record = state.ledger.status(&TransactionId::new(id))?;
    Ok(Json(record))
}

/// `GET /api/admin/nonce/{address}`
async fn admin_nonce(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<NonceResponse>, ApiError> {
    let signer: EthAddress = address
        .parse()
        .map_err(|_| ApiError::validation(format!("'{address}' is not a valid address")))?;
    Ok(Json(NonceResponse {
        nonce: state.ledger.nonce_of(&signer),
        address: signer,
    }))
}

/// `GET /api/admin/config`
async fn admin_config(State(state): State<AppState>) -> Json<AdminConfigResponse> {
    let admin_signers = state.ledger.admins();
    Json(AdminConfigResponse {
        admin_count: admin_signers.len(),
        pending_count: state.ledger.pending_count(),
        admin_signers,
    })
}

/// `GET /health`
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "approval-bridge",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
