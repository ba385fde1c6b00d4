//! API error envelope with stable error kinds.
//!
//! Every ledger failure maps to exactly one kind + HTTP status, so clients
//! can branch on `error.kind` without parsing messages, and a message never
//! carries internal state.

use ab_02_pending_ledger::LedgerError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Stable error kind strings.
pub mod kinds {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const INVALID_SIGNATURE: &str = "INVALID_SIGNATURE";
    pub const EXECUTION_DISPATCH_FAILED: &str = "EXECUTION_DISPATCH_FAILED";
}

/// An API-level error: HTTP status, stable kind, human-readable message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status the envelope is served with.
    pub status: StatusCode,
    /// Stable kind string clients branch on.
    pub kind: &'static str,
    /// Human-readable message. Never includes internal state.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    /// Missing or malformed request fields.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, kinds::VALIDATION_ERROR, message)
    }

    /// Signer not in the administrator set.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, kinds::UNAUTHORIZED, message)
    }

    /// Unknown transaction id.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, kinds::NOT_FOUND, message)
    }

    /// Record not in the state the operation requires.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, kinds::INVALID_STATE, message)
    }

    /// Signature did not verify; the signer's nonce was not consumed.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, kinds::INVALID_SIGNATURE, message)
    }

    /// Settlement dispatch failed; the record stays `ADMIN_APPROVED`.
    pub fn dispatch_failed(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            kinds::EXECUTION_DISPATCH_FAILED,
            message,
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<LedgerError> for ApiError {
    fn from(error: LedgerError) -> Self {
        match &error {
            LedgerError::Validation(_) => Self::validation(error.to_string()),
            LedgerError::UnauthorizedSigner { .. } => Self::unauthorized(error.to_string()),
            LedgerError::NotFound { .. } => Self::not_found(error.to_string()),
            LedgerError::InvalidTransition { .. } => Self::invalid_state(error.to_string()),
            LedgerError::InvalidSignature { .. } => Self::invalid_signature(error.to_string()),
            LedgerError::DispatchFailed { .. } => Self::dispatch_failed(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "error": {
                "kind": self.kind,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

/// Gateway-level errors (server lifecycle, not per-request).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an error.
    #[error("server error: {0}")]
    Serve(String),
}
