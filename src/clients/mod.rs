//! Type-safe wrappers that hide message passing behind domain methods.

pub mod purchase_client;
pub mod stock_client;

pub use purchase_client::PurchaseClient;
pub use stock_client::StockClient;
