//! Purchase ledger status machine.
//!
//! Transition rules:
//! - `pending`   -> `succeeded`, `failed`
//! - `succeeded` -> `refunded`
//! - `failed`, `refunded` are terminal

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SUCCEEDED: &str = "succeeded";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_REFUNDED: &str = "refunded";

/// Lifecycle status of a purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PurchaseStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl PurchaseStatus {
    /// Database / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Succeeded => STATUS_SUCCEEDED,
            Self::Failed => STATUS_FAILED,
            Self::Refunded => STATUS_REFUNDED,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_SUCCEEDED => Ok(Self::Succeeded),
            STATUS_FAILED => Ok(Self::Failed),
            STATUS_REFUNDED => Ok(Self::Refunded),
            other => Err(CoreError::Validation(format!(
                "Invalid purchase status '{other}'. Must be one of: pending, succeeded, failed, refunded"
            ))),
        }
    }

    /// Statuses reachable in one step from `self`.
    pub fn valid_transitions(self) -> &'static [PurchaseStatus] {
        match self {
            Self::Pending => &[Self::Succeeded, Self::Failed],
            Self::Succeeded => &[Self::Refunded],
            Self::Failed | Self::Refunded => &[],
        }
    }

    pub fn can_transition_to(self, next: PurchaseStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Validate that a purchase may move from `current` to `next`.
///
/// An invalid transition is a [`CoreError::Conflict`]: the request is
/// well-formed but the record is not in a state that allows it.
pub fn validate_transition(current: PurchaseStatus, next: PurchaseStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot transition purchase from '{}' to '{}'. Allowed transitions: {:?}",
            current.as_str(),
            next.as_str(),
            current
                .valid_transitions()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
        )))
    }
}
