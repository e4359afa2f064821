//! # Stock Client
//!
//! Provides a high‑level API over the sharded stock actors: creating boxes,
//! drawing from them and inspecting what is left.
use crate::model::{Caller, DrawResult, SeriesId, StockBox, StockCreate, StockId, UserId};
use crate::stock_actor::{DrawOutcome, StockAction, StockActionResult, StockError};
use actor_framework::{Filter, FrameworkError, ShardedClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Stock actors.
///
/// Requests for one box always reach the shard that owns it.
#[derive(Clone)]
pub struct StockClient {
    inner: ShardedClient<StockBox>,
}

impl StockClient {
    pub fn new(inner: ShardedClient<StockBox>) -> Self {
        Self { inner }
    }

    fn map_error(e: FrameworkError) -> StockError {
        if let Some(err) = e.entity_error::<StockError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => StockError::NotFound(id),
            other => StockError::Persistence(other.to_string()),
        }
    }

    /// Creates `quantity` boxes of a series, each sealed independently.
    ///
    /// Fails with `NotFound` if the series has no normal styles. Boxes created
    /// before a failure are kept.
    #[instrument(skip(self))]
    pub async fn create_stock(
        &self,
        series_id: SeriesId,
        quantity: usize,
    ) -> Result<Vec<StockBox>, StockError> {
        let mut boxes = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            let id = self
                .inner
                .create(StockCreate { series_id })
                .await
                .map_err(Self::map_error)?;
            let stock = self
                .inner
                .get(id)
                .await
                .map_err(Self::map_error)?
                .ok_or_else(|| StockError::NotFound(id.to_string()))?;
            boxes.push(stock);
        }
        info!(%series_id, created = boxes.len(), "Stock created");
        Ok(boxes)
    }

    /// Draws one item from a box for `user_id`.
    ///
    /// An unknown or sold-out box is a normal outcome with `success == false`.
    #[instrument(skip(self))]
    pub async fn purchase_from_box(
        &self,
        box_id: StockId,
        user_id: UserId,
    ) -> Result<DrawResult, StockError> {
        debug!("Sending draw");
        match self
            .inner
            .perform_action(box_id, StockAction::Draw { user_id })
            .await
        {
            Ok(StockActionResult::Draw(DrawOutcome::Drawn {
                style_id,
                purchase_id,
            })) => Ok(DrawResult::drawn(style_id, purchase_id)),
            Ok(StockActionResult::Draw(DrawOutcome::SoldOut)) => Ok(DrawResult::unavailable()),
            Ok(_) => unreachable!("Draw action must return Draw result"),
            Err(FrameworkError::NotFound(_)) => {
                warn!(%box_id, "Draw from unknown box");
                Ok(DrawResult::unavailable())
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_stock(&self, box_id: StockId) -> Result<Option<StockBox>, StockError> {
        self.inner.get(box_id).await.map_err(Self::map_error)
    }

    /// All boxes of a series, in id order.
    #[instrument(skip(self))]
    pub async fn get_stocks_by_series(
        &self,
        series_id: SeriesId,
    ) -> Result<Vec<StockBox>, StockError> {
        self.inner
            .list(Filter::new(move |stock: &StockBox| stock.series_id == series_id))
            .await
            .map_err(Self::map_error)
    }

    /// Slots still available in a box, or `None` if there is no such box.
    #[instrument(skip(self))]
    pub async fn remaining(&self, box_id: StockId) -> Result<Option<usize>, StockError> {
        match self.inner.perform_action(box_id, StockAction::Remaining).await {
            Ok(StockActionResult::Remaining(count)) => Ok(Some(count)),
            Ok(_) => unreachable!("Remaining action must return Remaining result"),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes a box. Returns `false` if it did not exist.
    #[instrument(skip(self))]
    pub async fn delete_stock(&self, caller: Caller, box_id: StockId) -> Result<bool, StockError> {
        if !caller.is_admin() {
            return Err(StockError::PermissionDenied(format!(
                "{} may not delete stock",
                caller.user_id
            )));
        }
        match self.inner.delete(box_id).await {
            Ok(()) => Ok(true),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
