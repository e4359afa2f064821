//! Demo run: seal a few boxes, draw from them and ship the results.

use actor_framework::tracing::setup_tracing;
use blindbox_engine::catalog::InMemoryCatalog;
use blindbox_engine::config::EngineConfig;
use blindbox_engine::lifecycle::BlindBoxSystem;
use blindbox_engine::model::{
    BatchShipping, Caller, PurchaseQuery, SeriesId, ShippingInfo, StyleId, UserId,
};
use blindbox_engine::random::RngSource;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = EngineConfig::from_env()?;
    info!(?config, "Starting blind-box engine");

    let catalog = InMemoryCatalog::new()
        .add_series(SeriesId(1), "Forest Friends", None)
        .add_style(SeriesId(1), StyleId(1), "Fox", false, None)
        .add_style(SeriesId(1), StyleId(2), "Owl", false, None)
        .add_style(SeriesId(1), StyleId(3), "Hedgehog", false, None)
        .add_style(SeriesId(1), StyleId(9), "Golden Stag", true, None);

    let system = BlindBoxSystem::with_source(
        Arc::new(catalog),
        Arc::new(RngSource::from_entropy()),
        config,
    );

    let boxes = system.stock_client.create_stock(SeriesId(1), 2).await?;
    let buyer = UserId(7);
    let customer = Caller::customer(buyer);
    let admin = Caller::admin(UserId(1));

    let span = tracing::info_span!("drawing", %buyer);
    let purchases = async {
        let mut purchases = Vec::new();
        for stock in &boxes {
            // One more draw than there are slots, to show the sold-out answer.
            for _ in 0..=stock.sealed_contents.len() {
                let draw = system.stock_client.purchase_from_box(stock.id, buyer).await?;
                match draw.purchase_id {
                    Some(purchase_id) => purchases.push(purchase_id),
                    None => warn!(box_id = %stock.id, "Box sold out"),
                }
            }
        }
        Ok::<_, Box<dyn Error>>(purchases)
    }
    .instrument(span)
    .await?;

    for id in &purchases {
        system
            .purchase_client
            .set_shipping_info(
                customer,
                *id,
                ShippingInfo {
                    receiver_name: "Alice".to_string(),
                    receiver_phone: "555-0100".to_string(),
                    shipping_address: "1 Birch Lane".to_string(),
                },
            )
            .await?;
    }

    let shipped = system
        .purchase_client
        .batch_shipping(
            admin,
            BatchShipping {
                ids: purchases.clone(),
                tracking_number: Some("TRK-0001".to_string()),
                shipped_at: None,
            },
        )
        .await?;
    info!(success = shipped.success, failed = shipped.failed, "Shipped");

    let page = system
        .purchase_client
        .get_user_purchases(customer, PurchaseQuery::default())
        .await?;
    for purchase in &page.purchases {
        info!(
            id = %purchase.id,
            style = %purchase.style_name,
            hidden = purchase.is_hidden,
            status = %purchase.shipping_status,
            "Purchase"
        );
    }

    let stats = system.purchase_client.get_purchase_stats(customer).await?;
    info!(?stats, "Done");

    system.shutdown().await?;
    Ok(())
}
