//! # Lifecycle
//!
//! Creates, wires and stops the actors of the engine. See [`BlindBoxSystem`].

pub mod blindbox_system;

pub use blindbox_system::*;
