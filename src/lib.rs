//! # Blind-Box Engine
//!
//! > **Inventory allocation and order lifecycle for blind-box sales.**
//!
//! A blind box is one physical box holding one item of every normal style of
//! a series, except that sometimes a rare *hidden* style takes one of the
//! slots. Buyers draw from a box without seeing which item they get; every
//! successful draw becomes a purchase that then moves through a shipping
//! lifecycle.
//!
//! ## 🏗️ Design
//!
//! Everything stateful is a [`ResourceActor`](actor_framework::ResourceActor):
//!
//! - **Stock shards** own the boxes. Each box id belongs to exactly one shard,
//!   which handles requests for it one at a time. A draw (pick, record
//!   purchase, mark sold) runs as a single action, so two buyers can never
//!   receive the same slot and a failed purchase leaves the box untouched.
//! - **The purchase actor** owns the order ledger and enforces the shipping
//!   state machine: `pending → shipped → delivered`, or `pending → cancelled`.
//!
//! Draws on different boxes proceed in parallel across shards.
//!
//! ### Error Handling
//! Each actor defines its own error type ([`StockError`](stock_actor::StockError),
//! [`PurchaseError`](purchase_actor::PurchaseError)). A failed purchase inside a
//! draw converts into `StockError` through `#[from]`. A sold-out or unknown
//! box is not an error: the draw returns a [`DrawResult`](model::DrawResult)
//! with `success == false`.
//!
//! ### Context Injection
//! The catalog, the purchase client and the random source are injected into
//! each stock shard at `run()`, see [`StockContext`](stock_actor::StockContext).
//!
//! ### Observability
//! `tracing` spans wrap every client call and every actor operation. Call
//! [`setup_tracing`](actor_framework::tracing::setup_tracing) once at startup.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - ids, boxes, purchases, callers
//! - [`catalog`] - read-only series/style lookup ([`CatalogReader`](catalog::CatalogReader))
//! - [`random`] - the randomness behind sealing and drawing ([`DrawSource`](random::DrawSource))
//! - [`config`] - [`EngineConfig`](config::EngineConfig), loaded from `BLINDBOX_*` variables
//! - [`stock_actor`], [`purchase_actor`] - the two entities
//! - [`clients`] - [`StockClient`](clients::StockClient), [`PurchaseClient`](clients::PurchaseClient)
//! - [`lifecycle`] - [`BlindBoxSystem`](lifecycle::BlindBoxSystem), which starts and stops it all
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod purchase_actor;
pub mod random;
pub mod stock_actor;
