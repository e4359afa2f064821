use crate::catalog::CatalogReader;
use crate::clients::{PurchaseClient, StockClient};
use crate::config::EngineConfig;
use crate::random::{DrawSource, RngSource};
use crate::stock_actor::StockContext;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the blind-box engine.
///
/// `BlindBoxSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping every actor
/// - **Dependency Wiring**: handing the purchase client, catalog and random
///   source to each stock shard
///
/// # Architecture
///
/// - **Purchase Actor**: one `ResourceActor<Purchase>`, the order ledger
/// - **Stock Shards**: `stock_shards` actors, each owning a disjoint set of box ids
///
/// Stock shards call the purchase actor while drawing; the purchase actor calls
/// nobody.
///
/// # Example
///
/// ```ignore
/// let system = BlindBoxSystem::new(Arc::new(catalog));
///
/// let boxes = system.stock_client.create_stock(SeriesId(1), 10).await?;
/// let draw = system.stock_client.purchase_from_box(boxes[0].id, UserId(7)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BlindBoxSystem {
    /// Client for the sharded Stock actors
    pub stock_client: StockClient,

    /// Client for the Purchase actor
    pub purchase_client: PurchaseClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BlindBoxSystem {
    /// Starts the system with default configuration and an entropy-seeded random source.
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self::with_source(
            catalog,
            Arc::new(RngSource::from_entropy()),
            EngineConfig::default(),
        )
    }

    /// Starts the system with an explicit random source and configuration.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn with_source(
        catalog: Arc<dyn CatalogReader>,
        source: Arc<dyn DrawSource>,
        config: EngineConfig,
    ) -> Self {
        // 1. Create actors (no dependencies)
        let (purchase_actor, purchase_client) = crate::purchase_actor::new(config.channel_buffer);
        let (stock_actors, stock_client) =
            crate::stock_actor::new(config.stock_shards, config.channel_buffer);

        let purchase_client =
            PurchaseClient::new(purchase_client).with_page_size(config.default_page_size);

        // 2. Start actors with injected context
        let mut handles = vec![tokio::spawn(purchase_actor.run(()))];
        let context = StockContext::new(
            catalog,
            purchase_client.clone(),
            source,
            config.hidden_probability,
        );
        for actor in stock_actors {
            handles.push(tokio::spawn(actor.run(context.clone())));
        }
        info!(shards = config.stock_shards, "Blind-box system started");

        Self {
            stock_client: StockClient::new(stock_client),
            purchase_client,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the stock channels; each stock shard then
    /// exits and drops its context, which releases the last purchase client
    /// and lets the purchase actor exit too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.stock_client);
        drop(self.purchase_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
