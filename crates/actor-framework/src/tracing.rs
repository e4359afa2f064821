//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! Every `ResourceActor` logs under an `entity_type` field instead of a module path, so the
//! compact format hides targets (`with_target(false)`). Log levels come from `RUST_LOG`:
//!
//! ```bash
//! # Lifecycle only: actor start/stop, created/deleted, action outcomes
//! RUST_LOG=info cargo run
//!
//! # Full payloads (create params, actions, filters)
//! RUST_LOG=debug cargo run
//! ```
//!
//! A single draw at `debug` looks like:
//!
//! ```text
//! DEBUG Action entity_type="StockBox" id=box_1 action=Draw { user_id: UserId(7) }
//! DEBUG Create entity_type="Purchase" params=PurchaseCreate { .. }
//! INFO Created entity_type="Purchase" id=purchase_1 size=1
//! INFO Action ok entity_type="StockBox" id=box_1
//! ```
//!
//! The nested `Create` shows the purchase being recorded *inside* the box's action, before the
//! box acknowledges the draw.
pub fn setup_tracing() {
    // A second call (e.g. from several tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
