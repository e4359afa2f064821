//! Custom actions for the Stock actor.

use crate::model::{PurchaseId, StyleId, UserId};

#[derive(Debug, Clone)]
pub enum StockAction {
    /// Draws one unsold slot for `user_id` and records the purchase.
    Draw { user_id: UserId },
    /// Counts slots still available.
    Remaining,
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone, PartialEq)]
pub enum StockActionResult {
    Draw(DrawOutcome),
    Remaining(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn {
        style_id: StyleId,
        purchase_id: PurchaseId,
    },
    SoldOut,
}
