//! Domain data structures.
//!
//! [`StockBox`] and [`Purchase`] are the two resources managed by actors; the
//! remaining types are ids, payloads and query shapes around them.

pub mod catalog;
pub mod purchase;
pub mod stock;
pub mod user;

pub use catalog::*;
pub use purchase::*;
pub use stock::*;
pub use user::*;
