//! # API Gateway Subsystem (AB-04)
//!
//! The HTTP surface of the approval bridge. Administrator dashboards and the
//! consensus tooling talk JSON to these routes; everything they can do is a
//! thin translation onto the pending ledger's operations.
//!
//! ## Routes
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | POST | `/api/transactions/submit` | stage a quorum-approved transaction |
//! | GET | `/api/transactions/pending` | pending records, oldest first |
//! | POST | `/api/transactions/approve` | record an admin decision |
//! | POST | `/api/transactions/execute` | execute an approved transaction |
//! | GET | `/api/transactions/{id}/status` | record snapshot |
//! | GET | `/api/admin/nonce/{address}` | signer's next nonce |
//! | GET | `/api/admin/config` | configured signers, counts |
//! | GET | `/health` | liveness |
//!
//! ## Error Contract
//!
//! Every failure is a JSON envelope `{"success": false, "error": {"kind",
//! "message"}}` with a stable kind string; internal state never leaks into
//! responses. Administrator identity is proven by signature alone, so no
//! transport-level authentication exists on any route.

pub mod domain;

mod router;
mod service;

// Re-export public API
pub use domain::config::{ApiConfig, ConfigError};
pub use domain::dto::{DecideRequest, ExecuteRequest, SubmitRequest};
pub use domain::error::{ApiError, GatewayError};
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;
