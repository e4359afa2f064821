//! [`ActorEntity`] implementation for [`StockBox`].
//!
//! A draw is one action, handled start to finish inside the shard that owns
//! the box: compute what is left, pick, fetch catalog data, record the
//! purchase, and only then mark the slot sold. If anything before the last
//! step fails the box is unchanged, and because the shard does not take its
//! next message until the action returns, no other draw on this box can
//! observe or interleave with the intermediate state.

use super::actions::{DrawOutcome, StockAction, StockActionResult};
use super::allocator::seal_box_contents;
use super::error::StockError;
use super::StockContext;
use crate::model::{PurchaseCreate, StockBox, StockCreate, StockId, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for StockBox {
    type Id = StockId;
    type Create = StockCreate;
    type Update = ();
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Context = StockContext;
    type Error = StockError;

    fn id(&self) -> &StockId {
        &self.id
    }

    fn from_create_params(id: StockId, params: StockCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.series_id))
    }

    /// Seals the box contents from the current catalog.
    async fn on_create(&mut self, ctx: &StockContext) -> Result<(), Self::Error> {
        let styles = ctx.catalog.styles_for_series(self.series_id).await?;
        self.sealed_contents = seal_box_contents(
            self.series_id,
            &styles,
            ctx.hidden_probability,
            ctx.source.as_ref(),
        )?;
        debug!(id = %self.id, slots = self.sealed_contents.len(), "Box sealed");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &StockContext) -> Result<(), Self::Error> {
        Err(StockError::Sealed(self.id.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: StockAction,
        ctx: &StockContext,
    ) -> Result<StockActionResult, Self::Error> {
        match action {
            StockAction::Draw { user_id } => self.draw(user_id, ctx).await.map(StockActionResult::Draw),
            StockAction::Remaining => Ok(StockActionResult::Remaining(self.remaining())),
        }
    }
}

impl StockBox {
    async fn draw(&mut self, user_id: UserId, ctx: &StockContext) -> Result<DrawOutcome, StockError> {
        if self.is_sold_out {
            return Ok(DrawOutcome::SoldOut);
        }

        let available = self.available();
        if available.is_empty() {
            self.is_sold_out = true;
            return Ok(DrawOutcome::SoldOut);
        }

        let style_id = available[ctx.source.pick(available.len()).min(available.len() - 1)];

        let detail = ctx
            .catalog
            .style(style_id)
            .await?
            .ok_or(StockError::StyleMissing(style_id))?;

        let purchase_id = ctx
            .purchases
            .create_purchase(PurchaseCreate {
                user_id,
                stock_id: self.id,
                series_id: self.series_id,
                style_id,
                series_name: detail.series_name,
                style_name: detail.name,
                series_cover: detail.series_cover,
                style_cover: detail.cover,
                is_hidden: detail.is_hidden,
            })
            .await?;

        self.record_sale(style_id);
        info!(
            id = %self.id,
            %style_id,
            %purchase_id,
            sold = self.sold_items.len(),
            sold_out = self.is_sold_out,
            "Drawn"
        );
        Ok(DrawOutcome::Drawn {
            style_id,
            purchase_id,
        })
    }
}
