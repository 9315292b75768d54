//! In-memory persistence for the marketplace.

use std::sync::Arc;

pub mod repositories;
pub mod seed;
pub mod session_cache;
pub mod store;

pub use store::Store;

pub type DbPool = Arc<Store>;

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(Store::new())
}
