//! Error types for the Stock actor.

use crate::catalog::CatalogError;
use crate::model::StyleId;
use crate::purchase_actor::PurchaseError;
use thiserror::Error;

/// Errors that can occur during inventory operations.
///
/// A sold-out or unknown box is *not* an error for a draw; see
/// [`DrawResult`](crate::model::DrawResult).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    /// The box does not exist, or its series has nothing to seal.
    #[error("Stock not found: {0}")]
    NotFound(String),

    /// The catalog lists a style in a box but cannot describe it.
    #[error("Style {0} missing from catalog")]
    StyleMissing(StyleId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The purchase for a draw could not be recorded; the box was left untouched.
    #[error("Failed to record purchase: {0}")]
    Purchase(#[from] PurchaseError),

    /// Box contents never change after sealing.
    #[error("Box {0} is sealed")]
    Sealed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// An error occurred while communicating with the actor system.
    #[error("Stock store unavailable: {0}")]
    Persistence(String),
}
