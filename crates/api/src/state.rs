use std::sync::Arc;

use mentorhub_core::recommendation::Suggester;
use mentorhub_db::session_cache::SessionCache;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: mentorhub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Ranking backend for the recommendation pipeline.
    pub suggester: Arc<dyn Suggester>,
    /// Write-through copy of each live session's profile.
    pub session_cache: Arc<dyn SessionCache>,
    pub event_bus: Arc<mentorhub_events::EventBus>,
}
