//! Shipping lifecycle actions for the Purchase actor.
//!
//! Every action carries the [`Caller`] so ownership and admin checks happen in
//! the entity, next to the state they protect.

use crate::model::{Caller, Purchase, ShippingInfo, ShippingUpdate};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum PurchaseAction {
    /// Buyer supplies receiver details. Pending only.
    SetShippingInfo { caller: Caller, info: ShippingInfo },
    /// Admin moves the purchase along the lifecycle.
    UpdateShippingStatus {
        caller: Caller,
        update: ShippingUpdate,
    },
    /// Admin ships a pending purchase; one item of a batch shipment.
    Ship {
        caller: Caller,
        tracking_number: Option<String>,
        shipped_at: Option<DateTime<Utc>>,
    },
    /// Buyer cancels before shipment.
    Cancel { caller: Caller },
    /// Buyer confirms receipt of a shipped purchase.
    ConfirmDelivery { caller: Caller },
    /// Whether receiver name, phone and address are all filled in.
    CheckShippingInfoComplete { caller: Caller },
}

/// Results from PurchaseActions - variants match 1:1 with PurchaseAction
#[derive(Debug, Clone)]
pub enum PurchaseActionResult {
    SetShippingInfo(Purchase),
    UpdateShippingStatus(Purchase),
    Ship(Purchase),
    Cancel(Purchase),
    ConfirmDelivery(Purchase),
    CheckShippingInfoComplete(bool),
}
