//! A sealed inventory box of one series.
//!
//! # Actor Framework
//! [`StockBox`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait and lives in a
//! sharded [`ResourceActor`](actor_framework::ResourceActor) pool; see
//! [`crate::stock_actor`] for the hooks and the draw action.
use crate::model::{PurchaseId, SeriesId, StyleId};
use actor_framework::ShardKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Type-safe identifier for inventory boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockId(pub u32);

impl From<u32> for StockId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "box_{}", self.0)
    }
}

impl ShardKey for StockId {
    fn shard_key(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBox {
    pub id: StockId,
    pub series_id: SeriesId,
    /// Fixed when the box is created; one slot per normal style, possibly with
    /// one slot replaced by a hidden style.
    pub sealed_contents: Vec<StyleId>,
    /// Styles drawn so far, in draw order.
    pub sold_items: Vec<StyleId>,
    pub is_sold_out: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new box. Contents are sealed by the actor.
#[derive(Debug, Clone)]
pub struct StockCreate {
    pub series_id: SeriesId,
}

/// Answer to a purchase request against one box.
///
/// `success == false` is a normal outcome (unknown or sold-out box), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub style_id: Option<StyleId>,
    pub success: bool,
    pub purchase_id: Option<PurchaseId>,
}

impl DrawResult {
    pub fn drawn(style_id: StyleId, purchase_id: PurchaseId) -> Self {
        Self {
            style_id: Some(style_id),
            success: true,
            purchase_id: Some(purchase_id),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            style_id: None,
            success: false,
            purchase_id: None,
        }
    }
}

impl StockBox {
    pub fn new(id: StockId, series_id: SeriesId) -> Self {
        Self {
            id,
            series_id,
            sealed_contents: Vec::new(),
            sold_items: Vec::new(),
            is_sold_out: false,
            created_at: Utc::now(),
        }
    }

    /// Sealed slots that have not been drawn yet, in sealed order.
    ///
    /// Each sold entry consumes exactly one occurrence of its style, so a box
    /// sealed with the same style twice still offers it once after one draw.
    pub fn available(&self) -> Vec<StyleId> {
        let mut sold: HashMap<StyleId, usize> = HashMap::new();
        for style in &self.sold_items {
            *sold.entry(*style).or_default() += 1;
        }

        self.sealed_contents
            .iter()
            .filter(|style| match sold.get_mut(*style) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    false
                }
                _ => true,
            })
            .copied()
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.available().len()
    }

    /// Records a drawn style and flips the sold-out flag once every slot is taken.
    pub(crate) fn record_sale(&mut self, style_id: StyleId) {
        self.sold_items.push(style_id);
        if self.sold_items.len() >= self.sealed_contents.len() {
            self.is_sold_out = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sealed(contents: &[u32], sold: &[u32]) -> StockBox {
        let mut stock = StockBox::new(StockId(1), SeriesId(1));
        stock.sealed_contents = contents.iter().copied().map(StyleId).collect();
        stock.sold_items = sold.iter().copied().map(StyleId).collect();
        stock
    }

    #[test]
    fn test_available_is_a_count_accurate_difference() {
        let stock = sealed(&[1, 2, 2, 3], &[2]);
        assert_eq!(stock.available(), vec![StyleId(1), StyleId(2), StyleId(3)]);

        let stock = sealed(&[1, 2, 2, 3], &[2, 2, 1]);
        assert_eq!(stock.available(), vec![StyleId(3)]);
    }

    #[test]
    fn test_record_sale_marks_sold_out_on_last_slot() {
        let mut stock = sealed(&[1, 2], &[]);
        stock.record_sale(StyleId(2));
        assert!(!stock.is_sold_out);
        assert_eq!(stock.remaining(), 1);

        stock.record_sale(StyleId(1));
        assert!(stock.is_sold_out);
        assert_eq!(stock.remaining(), 0);
    }

    #[test]
    fn test_box_ids_display_with_prefix() {
        assert_eq!(StockId(7).to_string(), "box_7");
        assert_eq!(StockId(7).shard_key(), 7);
    }
}
