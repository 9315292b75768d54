//! Periodic cleanup of ended and expired login sessions.
//!
//! Each pruned session also loses its session-cache entry, so neither the
//! in-memory map nor the cache directory outlives the sessions behind it.

use std::sync::Arc;
use std::time::Duration;

use mentorhub_core::types::Timestamp;
use mentorhub_db::repositories::SessionRepo;
use mentorhub_db::session_cache::SessionCache;
use mentorhub_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How often the session table is swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub struct SessionSweeper {
    pool: DbPool,
    session_cache: Arc<dyn SessionCache>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(pool: DbPool, session_cache: Arc<dyn SessionCache>, interval: Duration) -> Self {
        Self {
            pool,
            session_cache,
            interval,
        }
    }

    /// Sweep on every tick until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Session sweeper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.sweep(chrono::Utc::now()).await;
                    if removed > 0 {
                        tracing::debug!(removed, "Pruned inactive sessions");
                    }
                }
            }
        }
    }

    /// Prune sessions inactive at `now` and evict their cache entries.
    /// Returns how many sessions were pruned.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let pruned = SessionRepo::prune(&self.pool, now).await;
        for session_id in &pruned {
            if let Err(e) = self.session_cache.remove(session_id).await {
                tracing::warn!(error = %e, session_id, "Failed to evict session cache entry");
            }
        }
        pruned.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mentorhub_core::profile::UserProfile;
    use mentorhub_db::session_cache::MemorySessionCache;

    use super::*;

    #[tokio::test]
    async fn sweep_evicts_cache_entries_of_pruned_sessions() {
        let pool = mentorhub_db::create_pool();
        let cache: Arc<dyn SessionCache> = Arc::new(MemorySessionCache::new());
        let profile = UserProfile::new_for_email("u@example.com", None);
        let now = Utc::now();

        SessionRepo::start(&pool, "stale", profile.id(), now - chrono::Duration::minutes(5)).await;
        SessionRepo::start(&pool, "live", profile.id(), now + chrono::Duration::hours(1)).await;
        cache.put("stale", &profile).await.unwrap();
        cache.put("live", &profile).await.unwrap();

        let sweeper = SessionSweeper::new(pool.clone(), Arc::clone(&cache), SWEEP_INTERVAL);
        assert_eq!(sweeper.sweep(now).await, 1);

        assert!(cache.get("stale").await.unwrap().is_none());
        assert_eq!(cache.get("live").await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn sweeper_prunes_then_stops_on_cancel() {
        let pool = mentorhub_db::create_pool();
        let cache: Arc<dyn SessionCache> = Arc::new(MemorySessionCache::new());
        let profile = UserProfile::new_for_email("u@example.com", None);
        SessionRepo::start(&pool, "stale", profile.id(), Utc::now() - chrono::Duration::minutes(5)).await;
        cache.put("stale", &profile).await.unwrap();

        let cancel = CancellationToken::new();
        let sweeper = SessionSweeper::new(pool.clone(), Arc::clone(&cache), Duration::from_millis(10));
        let handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move { sweeper.run(cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();

        assert!(SessionRepo::prune(&pool, Utc::now()).await.is_empty());
        assert!(cache.get("stale").await.unwrap().is_none());
    }
}
