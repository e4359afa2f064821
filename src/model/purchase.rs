//! Purchase records and the shipping lifecycle they move through.
//!
//! A purchase is created exactly once, by an inventory box, at the moment a
//! draw succeeds. Everything after that is the shipping state machine:
//!
//! ```text
//! pending ──► shipped ──► delivered
//!    │
//!    └──────► cancelled
//! ```
//!
//! `delivered` and `cancelled` are terminal.
use crate::model::{SeriesId, StockId, StyleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PurchaseId(pub u32);

impl From<u32> for PurchaseId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "purchase_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl ShippingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ShippingStatus::Delivered | ShippingStatus::Cancelled)
    }

    /// The only legal edges of the lifecycle.
    pub fn can_transition_to(self, next: ShippingStatus) -> bool {
        matches!(
            (self, next),
            (ShippingStatus::Pending, ShippingStatus::Shipped)
                | (ShippingStatus::Pending, ShippingStatus::Cancelled)
                | (ShippingStatus::Shipped, ShippingStatus::Delivered)
        )
    }
}

impl Display for ShippingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShippingStatus::Pending => "pending",
            ShippingStatus::Shipped => "shipped",
            ShippingStatus::Delivered => "delivered",
            ShippingStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// An order produced by one successful draw.
///
/// Catalog names and covers are copied in at draw time so the record stays
/// readable even if the catalog changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub series_id: SeriesId,
    pub style_id: StyleId,
    pub stock_id: StockId,
    pub series_name: String,
    pub style_name: String,
    pub series_cover: Option<String>,
    pub style_cover: Option<String>,
    pub is_hidden: bool,
    pub shipping_status: ShippingStatus,
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub purchased_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for recording a drawn item.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseCreate {
    pub user_id: UserId,
    pub stock_id: StockId,
    pub series_id: SeriesId,
    pub style_id: StyleId,
    pub series_name: String,
    pub style_name: String,
    pub series_cover: Option<String>,
    pub style_cover: Option<String>,
    pub is_hidden: bool,
}

impl Purchase {
    pub fn new(id: PurchaseId, params: PurchaseCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: params.user_id,
            series_id: params.series_id,
            style_id: params.style_id,
            stock_id: params.stock_id,
            series_name: params.series_name,
            style_name: params.style_name,
            series_cover: params.series_cover,
            style_cover: params.style_cover,
            is_hidden: params.is_hidden,
            shipping_status: ShippingStatus::Pending,
            receiver_name: None,
            receiver_phone: None,
            shipping_address: None,
            tracking_number: None,
            shipped_at: None,
            delivered_at: None,
            purchased_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when receiver name, phone and address are all present and non-blank.
    pub fn has_complete_shipping_info(&self) -> bool {
        [
            &self.receiver_name,
            &self.receiver_phone,
            &self.shipping_address,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Receiver details supplied by the buyer before shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub shipping_address: String,
}

/// Admin status change. Timestamps default to "now" when the status is entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingUpdate {
    pub shipping_status: ShippingStatus,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl ShippingUpdate {
    pub fn to(shipping_status: ShippingStatus) -> Self {
        Self {
            shipping_status,
            tracking_number: None,
            shipped_at: None,
            delivered_at: None,
        }
    }

    pub fn with_tracking(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }
}

/// Ship several pending purchases at once with a shared tracking number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchShipping {
    pub ids: Vec<PurchaseId>,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
}

/// Paging and filtering for a user's own purchase history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseQuery {
    pub shipping_status: Option<ShippingStatus>,
    /// 1-based; `None` means the first page.
    pub page: Option<usize>,
    /// `None` uses the configured default page size.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePage {
    pub purchases: Vec<Purchase>,
    /// Matching purchases across all pages.
    pub total: usize,
}

/// Admin-side search across every user's purchases. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseFilter {
    pub user_id: Option<UserId>,
    pub series_id: Option<SeriesId>,
    pub style_id: Option<StyleId>,
    pub shipping_status: Option<ShippingStatus>,
}

impl PurchaseFilter {
    pub fn matches(&self, purchase: &Purchase) -> bool {
        self.user_id.map_or(true, |id| purchase.user_id == id)
            && self.series_id.map_or(true, |id| purchase.series_id == id)
            && self.style_id.map_or(true, |id| purchase.style_id == id)
            && self
                .shipping_status
                .map_or(true, |status| purchase.shipping_status == status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseStats {
    pub total: usize,
    pub pending: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl PurchaseStats {
    pub fn tally<'a>(purchases: impl IntoIterator<Item = &'a Purchase>) -> Self {
        purchases
            .into_iter()
            .fold(Self::default(), |mut stats, purchase| {
                stats.total += 1;
                match purchase.shipping_status {
                    ShippingStatus::Pending => stats.pending += 1,
                    ShippingStatus::Shipped => stats.shipped += 1,
                    ShippingStatus::Delivered => stats.delivered += 1,
                    ShippingStatus::Cancelled => stats.cancelled += 1,
                }
                stats
            })
    }
}

/// Outcome of a batch operation. Items are applied independently, so a batch
/// can partially succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<BatchFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub id: PurchaseId,
    pub reason: String,
}

impl BatchResult {
    pub fn record<E: Display>(&mut self, id: PurchaseId, outcome: Result<(), E>) {
        match outcome {
            Ok(()) => self.success += 1,
            Err(e) => {
                self.failed += 1;
                self.errors.push(BatchFailure {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
}
