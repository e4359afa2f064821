//! Error types for the Purchase actor.

use crate::model::ShippingStatus;
use thiserror::Error;

/// Errors that can occur during purchase operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseError {
    /// The purchase does not exist, or belongs to someone else. The two are
    /// deliberately indistinguishable to the caller.
    #[error("Purchase not found: {0}")]
    NotFound(String),

    /// The lifecycle forbids the operation from the current status.
    #[error("Cannot {operation} a purchase that is {status}")]
    InvalidState {
        status: ShippingStatus,
        operation: String,
    },

    /// A customer attempted an admin-only operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Required input was missing or blank.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The purchase store could not be reached.
    #[error("Purchase store unavailable: {0}")]
    Persistence(String),
}

impl From<String> for PurchaseError {
    fn from(msg: String) -> Self {
        PurchaseError::Persistence(msg)
    }
}
