//! # Transaction Lifecycle States
//!
//! The four-state machine every bridged transaction moves through. The wire
//! form is the upper-snake name (`"PENDING_ADMIN_APPROVAL"`), matching what
//! admin dashboards and the consensus tooling already display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a bridged transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    /// Consensus quorum reached; waiting for a human decision.
    #[default]
    PendingAdminApproval,
    /// An administrator approved; settlement may proceed.
    AdminApproved,
    /// An administrator rejected. Terminal.
    AdminRejected,
    /// Settlement dispatched and recorded. Terminal.
    Executed,
}

impl TransactionState {
    /// Check if a transition to `next` is allowed by the lifecycle.
    #[must_use]
    pub fn can_transition_to(&self, next: TransactionState) -> bool {
        matches!(
            (self, next),
            (
                TransactionState::PendingAdminApproval,
                TransactionState::AdminApproved | TransactionState::AdminRejected
            ) | (TransactionState::AdminApproved, TransactionState::Executed)
        )
    }

    /// Terminal states admit no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::AdminRejected | TransactionState::Executed
        )
    }

    /// True while the record still awaits an administrator.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionState::PendingAdminApproval)
    }

    /// The wire-form name, for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::PendingAdminApproval => "PENDING_ADMIN_APPROVAL",
            TransactionState::AdminApproved => "ADMIN_APPROVED",
            TransactionState::AdminRejected => "ADMIN_REJECTED",
            TransactionState::Executed => "EXECUTED",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
