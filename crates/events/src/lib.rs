//! Marketplace event bus.
//!
//! - [`EventBus`] fans out [`MarketplaceEvent`]s over
//!   `tokio::sync::broadcast`.
//! - [`EventLogger`] is the background consumer that records every event
//!   in the log and acknowledges reminder requests.

pub mod bus;
pub mod logger;

pub use bus::{EventBus, MarketplaceEvent};
pub use logger::EventLogger;
