//! Purchase ledger tests against a real purchase actor, without any stock.

use actor_framework::ActorClient;
use blindbox_engine::clients::PurchaseClient;
use blindbox_engine::model::{
    Caller, PurchaseCreate, PurchaseFilter, PurchaseId, PurchaseQuery, SeriesId, ShippingInfo,
    ShippingStatus, ShippingUpdate, StockId, StyleId, UserId,
};
use blindbox_engine::purchase_actor::{self, PurchaseError};
use chrono::Utc;

fn spawn_ledger(page_size: usize) -> PurchaseClient {
    let (actor, client) = purchase_actor::new(16);
    tokio::spawn(actor.run(()));
    PurchaseClient::new(client).with_page_size(page_size)
}

fn draw(user: u32, style: u32) -> PurchaseCreate {
    PurchaseCreate {
        user_id: UserId(user),
        stock_id: StockId(1),
        series_id: SeriesId(1),
        style_id: StyleId(style),
        series_name: "Forest Friends".into(),
        style_name: format!("Style {style}"),
        series_cover: None,
        style_cover: None,
        is_hidden: false,
    }
}

async fn record(ledger: &PurchaseClient, user: u32, count: u32) -> Vec<PurchaseId> {
    let mut ids = Vec::new();
    for style in 1..=count {
        ids.push(ledger.create_purchase(draw(user, style)).await.unwrap());
    }
    ids
}

#[tokio::test]
async fn test_user_purchases_are_paged_newest_first() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let ids = record(&ledger, 1, 5).await;
    record(&ledger, 2, 2).await;

    let first = ledger
        .get_user_purchases(
            alice,
            PurchaseQuery {
                page: Some(1),
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(first.total, 5);
    let first_ids: Vec<PurchaseId> = first.purchases.iter().map(|p| p.id).collect();
    assert_eq!(first_ids, vec![ids[4], ids[3]]);

    let last = ledger
        .get_user_purchases(
            alice,
            PurchaseQuery {
                page: Some(3),
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(last.total, 5);
    assert_eq!(last.purchases.len(), 1);
    assert_eq!(last.purchases[0].id, ids[0]);

    let beyond = ledger
        .get_user_purchases(
            alice,
            PurchaseQuery {
                page: Some(9),
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(beyond.total, 5);
    assert!(beyond.purchases.is_empty());
}

#[tokio::test]
async fn test_default_page_size_applies_without_limit() {
    let ledger = spawn_ledger(3);
    record(&ledger, 1, 5).await;

    let page = ledger
        .get_user_purchases(Caller::customer(UserId(1)), PurchaseQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.purchases.len(), 3);
}

#[tokio::test]
async fn test_status_filter_and_stats() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let admin = Caller::admin(UserId(100));
    let ids = record(&ledger, 1, 4).await;

    ledger.cancel_purchase(alice, ids[0]).await.unwrap();
    ledger
        .update_shipping_status(admin, ids[1], ShippingUpdate::to(ShippingStatus::Shipped))
        .await
        .unwrap();

    let cancelled = ledger
        .get_user_purchases(
            alice,
            PurchaseQuery {
                shipping_status: Some(ShippingStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.total, 1);
    assert_eq!(cancelled.purchases[0].id, ids[0]);

    let stats = ledger.get_purchase_stats(alice).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.shipped, 1);
    assert_eq!(stats.delivered, 0);
    assert_eq!(stats.cancelled, 1);

    let empty = ledger
        .get_purchase_stats(Caller::customer(UserId(42)))
        .await
        .unwrap();
    assert_eq!(empty.total, 0);
}

#[tokio::test]
async fn test_admin_listing_and_filters() {
    let ledger = spawn_ledger(10);
    record(&ledger, 1, 3).await;
    record(&ledger, 2, 2).await;

    let err = ledger
        .list_purchases(Caller::customer(UserId(1)), PurchaseFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PurchaseError::PermissionDenied(_)));

    let admin = Caller::admin(UserId(100));
    let all = ledger
        .list_purchases(admin, PurchaseFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 5);

    let bobs = ledger
        .list_purchases(
            admin,
            PurchaseFilter {
                user_id: Some(UserId(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(bobs.len(), 2);
    assert!(bobs.iter().all(|p| p.user_id == UserId(2)));

    let style_two = ledger
        .list_purchases(
            admin,
            PurchaseFilter {
                style_id: Some(StyleId(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(style_two.len(), 2);
}

#[tokio::test]
async fn test_other_customers_cannot_see_or_touch_a_purchase() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let mallory = Caller::customer(UserId(666));
    let id = record(&ledger, 1, 1).await[0];

    assert!(ledger.get_purchase(mallory, id).await.unwrap().is_none());
    assert!(ledger.get_purchase(alice, id).await.unwrap().is_some());
    assert!(ledger
        .get_purchase(Caller::admin(UserId(100)), id)
        .await
        .unwrap()
        .is_some());

    let err = ledger.cancel_purchase(mallory, id).await.unwrap_err();
    assert!(matches!(err, PurchaseError::NotFound(_)));

    let err = ledger
        .set_shipping_info(
            mallory,
            id,
            ShippingInfo {
                receiver_name: "Mallory".into(),
                receiver_phone: "555-0666".into(),
                shipping_address: "Somewhere else".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PurchaseError::NotFound(_)));

    let err = ledger.delete_purchase(mallory, id).await.unwrap_err();
    assert!(matches!(err, PurchaseError::NotFound(_)));
    assert!(ledger.get_purchase(alice, id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_shipping_info_is_validated() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let id = record(&ledger, 1, 1).await[0];

    let err = ledger
        .set_shipping_info(
            alice,
            id,
            ShippingInfo {
                receiver_name: "   ".into(),
                receiver_phone: "555-0100".into(),
                shipping_address: "1 Birch Lane".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PurchaseError::Validation(_)));
    assert!(!ledger.check_shipping_info_complete(alice, id).await.unwrap());

    let updated = ledger
        .set_shipping_info(
            alice,
            id,
            ShippingInfo {
                receiver_name: " Alice ".into(),
                receiver_phone: "555-0100".into(),
                shipping_address: "1 Birch Lane".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.receiver_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_status_updates_follow_the_lifecycle() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let admin = Caller::admin(UserId(100));
    let id = record(&ledger, 1, 1).await[0];

    let err = ledger
        .update_shipping_status(alice, id, ShippingUpdate::to(ShippingStatus::Shipped))
        .await
        .unwrap_err();
    assert!(matches!(err, PurchaseError::PermissionDenied(_)));

    let err = ledger
        .update_shipping_status(admin, id, ShippingUpdate::to(ShippingStatus::Delivered))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::InvalidState {
            status: ShippingStatus::Pending,
            ..
        }
    ));

    let err = ledger.confirm_delivery(alice, id).await.unwrap_err();
    assert!(matches!(err, PurchaseError::InvalidState { .. }));

    let shipped = ledger
        .update_shipping_status(admin, id, ShippingUpdate::to(ShippingStatus::Shipped))
        .await
        .unwrap();
    let first_shipped_at = shipped.shipped_at;

    // Re-applying the same status amends the tracking number only.
    let amended = ledger
        .update_shipping_status(
            admin,
            id,
            ShippingUpdate::to(ShippingStatus::Shipped).with_tracking("TRK-2"),
        )
        .await
        .unwrap();
    assert_eq!(amended.tracking_number.as_deref(), Some("TRK-2"));
    assert_eq!(amended.shipped_at, first_shipped_at);

    ledger.confirm_delivery(alice, id).await.unwrap();
    let err = ledger
        .update_shipping_status(admin, id, ShippingUpdate::to(ShippingStatus::Delivered))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::InvalidState {
            status: ShippingStatus::Delivered,
            ..
        }
    ));
}

#[tokio::test]
async fn test_batch_delete_applies_ownership_per_item() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let mine = record(&ledger, 1, 2).await;
    let theirs = record(&ledger, 2, 1).await;

    let result = ledger
        .batch_delete(alice, vec![mine[0], theirs[0], mine[1], PurchaseId(999)])
        .await
        .unwrap();
    assert_eq!(result.success, 2);
    assert_eq!(result.failed, 2);
    let failed: Vec<PurchaseId> = result.errors.iter().map(|e| e.id).collect();
    assert_eq!(failed, vec![theirs[0], PurchaseId(999)]);

    assert!(ledger.get_purchase(alice, mine[0]).await.unwrap().is_none());
    let admin = Caller::admin(UserId(100));
    assert!(ledger.get_purchase(admin, theirs[0]).await.unwrap().is_some());

    ledger.delete_purchase(admin, theirs[0]).await.unwrap();
    assert!(ledger.get_purchase(admin, theirs[0]).await.unwrap().is_none());
}

#[tokio::test]
async fn test_cancel_cannot_carry_shipping_fields() {
    let ledger = spawn_ledger(10);
    let admin = Caller::admin(UserId(100));
    let id = record(&ledger, 1, 1).await[0];

    let mut update = ShippingUpdate::to(ShippingStatus::Cancelled).with_tracking("TRK");
    update.shipped_at = Some(Utc::now());
    update.delivered_at = Some(Utc::now());
    let err = ledger
        .update_shipping_status(admin, id, update)
        .await
        .unwrap_err();
    assert!(matches!(err, PurchaseError::Validation(_)));

    let cancelled = ledger
        .update_shipping_status(admin, id, ShippingUpdate::to(ShippingStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.shipping_status, ShippingStatus::Cancelled);
    assert!(cancelled.tracking_number.is_none());
    assert!(cancelled.shipped_at.is_none());
    assert!(cancelled.delivered_at.is_none());
}

#[tokio::test]
async fn test_generic_update_is_refused() {
    let ledger = spawn_ledger(10);
    let alice = Caller::customer(UserId(1));
    let id = record(&ledger, 1, 1).await[0];

    let err = ledger.inner().update(id, ()).await.unwrap_err();
    assert!(matches!(
        err.entity_error::<PurchaseError>(),
        Some(PurchaseError::Validation(_))
    ));

    let purchase = ledger.get_purchase(alice, id).await.unwrap().unwrap();
    assert_eq!(purchase.shipping_status, ShippingStatus::Pending);
}
