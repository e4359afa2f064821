//! # Purchase Client
//!
//! High‑level API for the order ledger. It wraps a `ResourceClient<Purchase>`,
//! applies caller visibility to reads, and drives batch operations item by item.
use crate::model::{
    BatchResult, BatchShipping, Caller, Purchase, PurchaseCreate, PurchaseFilter, PurchaseId,
    PurchasePage, PurchaseQuery, PurchaseStats, ShippingInfo, ShippingUpdate,
};
use crate::purchase_actor::{PurchaseAction, PurchaseActionResult, PurchaseError};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

const DEFAULT_PAGE_SIZE: usize = 10;

/// Client for interacting with the Purchase actor.
#[derive(Clone)]
pub struct PurchaseClient {
    inner: ResourceClient<Purchase>,
    page_size: usize,
}

#[async_trait]
impl ActorClient<Purchase> for PurchaseClient {
    type Error = PurchaseError;

    fn inner(&self) -> &ResourceClient<Purchase> {
        &self.inner
    }

    /// Hands back the entity's own error when there is one, so callers can
    /// match on `InvalidState` and friends.
    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<PurchaseError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => PurchaseError::NotFound(id),
            other => PurchaseError::Persistence(other.to_string()),
        }
    }
}

impl PurchaseClient {
    pub fn new(inner: ResourceClient<Purchase>) -> Self {
        Self {
            inner,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used when a [`PurchaseQuery`] does not set `limit`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn act(
        &self,
        id: PurchaseId,
        action: PurchaseAction,
    ) -> Result<PurchaseActionResult, PurchaseError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Records a drawn item. Only inventory boxes call this, mid-draw.
    #[instrument(skip(self, params), fields(stock_id = %params.stock_id, style_id = %params.style_id))]
    pub async fn create_purchase(&self, params: PurchaseCreate) -> Result<PurchaseId, PurchaseError> {
        debug!(?params, "create_purchase called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The purchase, if it exists and the caller may see it.
    #[instrument(skip(self))]
    pub async fn get_purchase(
        &self,
        caller: Caller,
        id: PurchaseId,
    ) -> Result<Option<Purchase>, PurchaseError> {
        let purchase = self.get(id).await?;
        Ok(purchase.filter(|p| caller.can_access(p.user_id)))
    }

    /// The caller's own purchases, newest first.
    #[instrument(skip(self))]
    pub async fn get_user_purchases(
        &self,
        caller: Caller,
        query: PurchaseQuery,
    ) -> Result<PurchasePage, PurchaseError> {
        let user_id = caller.user_id;
        let status = query.shipping_status;
        let mut purchases = self
            .list(Filter::new(move |p: &Purchase| {
                p.user_id == user_id && status.map_or(true, |s| p.shipping_status == s)
            }))
            .await?;
        purchases.sort_by_key(|p| Reverse((p.purchased_at, p.id)));

        let total = purchases.len();
        let limit = query.limit.unwrap_or(self.page_size).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let purchases = purchases
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();
        Ok(PurchasePage { purchases, total })
    }

    /// Admin search across all users, in id order.
    #[instrument(skip(self))]
    pub async fn list_purchases(
        &self,
        caller: Caller,
        filter: PurchaseFilter,
    ) -> Result<Vec<Purchase>, PurchaseError> {
        require_admin(&caller, "list all purchases")?;
        self.list(Filter::new(move |p: &Purchase| filter.matches(p)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_purchase_stats(&self, caller: Caller) -> Result<PurchaseStats, PurchaseError> {
        let user_id = caller.user_id;
        let purchases = self
            .list(Filter::new(move |p: &Purchase| p.user_id == user_id))
            .await?;
        Ok(PurchaseStats::tally(&purchases))
    }

    #[instrument(skip(self, info))]
    pub async fn set_shipping_info(
        &self,
        caller: Caller,
        id: PurchaseId,
        info: ShippingInfo,
    ) -> Result<Purchase, PurchaseError> {
        match self.act(id, PurchaseAction::SetShippingInfo { caller, info }).await? {
            PurchaseActionResult::SetShippingInfo(purchase) => Ok(purchase),
            _ => unreachable!("SetShippingInfo action must return SetShippingInfo result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_shipping_status(
        &self,
        caller: Caller,
        id: PurchaseId,
        update: ShippingUpdate,
    ) -> Result<Purchase, PurchaseError> {
        match self
            .act(id, PurchaseAction::UpdateShippingStatus { caller, update })
            .await?
        {
            PurchaseActionResult::UpdateShippingStatus(purchase) => {
                info!(%id, status = %purchase.shipping_status, "Shipping status updated");
                Ok(purchase)
            }
            _ => unreachable!("UpdateShippingStatus action must return UpdateShippingStatus result"),
        }
    }

    /// Ships every pending purchase in `batch.ids`. Items are applied one by
    /// one; failures are collected, not fatal.
    #[instrument(skip(self, batch), fields(count = batch.ids.len()))]
    pub async fn batch_shipping(
        &self,
        caller: Caller,
        batch: BatchShipping,
    ) -> Result<BatchResult, PurchaseError> {
        require_admin(&caller, "ship purchases")?;
        let mut result = BatchResult::default();
        for id in batch.ids {
            let outcome = self
                .act(
                    id,
                    PurchaseAction::Ship {
                        caller,
                        tracking_number: batch.tracking_number.clone(),
                        shipped_at: batch.shipped_at,
                    },
                )
                .await
                .map(|_| ());
            result.record(id, outcome);
        }
        info!(success = result.success, failed = result.failed, "Batch shipping done");
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn cancel_purchase(
        &self,
        caller: Caller,
        id: PurchaseId,
    ) -> Result<Purchase, PurchaseError> {
        match self.act(id, PurchaseAction::Cancel { caller }).await? {
            PurchaseActionResult::Cancel(purchase) => Ok(purchase),
            _ => unreachable!("Cancel action must return Cancel result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn confirm_delivery(
        &self,
        caller: Caller,
        id: PurchaseId,
    ) -> Result<Purchase, PurchaseError> {
        match self.act(id, PurchaseAction::ConfirmDelivery { caller }).await? {
            PurchaseActionResult::ConfirmDelivery(purchase) => Ok(purchase),
            _ => unreachable!("ConfirmDelivery action must return ConfirmDelivery result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn check_shipping_info_complete(
        &self,
        caller: Caller,
        id: PurchaseId,
    ) -> Result<bool, PurchaseError> {
        match self
            .act(id, PurchaseAction::CheckShippingInfoComplete { caller })
            .await?
        {
            PurchaseActionResult::CheckShippingInfoComplete(complete) => Ok(complete),
            _ => unreachable!(
                "CheckShippingInfoComplete action must return CheckShippingInfoComplete result"
            ),
        }
    }

    /// Hard-deletes a purchase the caller owns (any purchase, for admins).
    #[instrument(skip(self))]
    pub async fn delete_purchase(&self, caller: Caller, id: PurchaseId) -> Result<(), PurchaseError> {
        // Ownership never changes, so checking before the delete is race-free.
        match self.get(id).await? {
            Some(purchase) if caller.can_access(purchase.user_id) => self.delete(id).await,
            _ => Err(PurchaseError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn batch_delete(
        &self,
        caller: Caller,
        ids: Vec<PurchaseId>,
    ) -> Result<BatchResult, PurchaseError> {
        let mut result = BatchResult::default();
        for id in ids {
            let outcome = self.delete_purchase(caller, id).await;
            result.record(id, outcome);
        }
        info!(success = result.success, failed = result.failed, "Batch delete done");
        Ok(result)
    }
}

fn require_admin(caller: &Caller, operation: &str) -> Result<(), PurchaseError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(PurchaseError::PermissionDenied(format!(
            "{} may not {operation}",
            caller.user_id
        )))
    }
}
