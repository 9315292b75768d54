//! Repository for login sessions.
//!
//! A session is the server-side record behind an access token's `jti`.
//! Ending it (logout) makes the token unusable even before it expires.

use chrono::Utc;
use mentorhub_core::types::{EntityId, Timestamp};
use serde::Serialize;

use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: EntityId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub ended_at: Option<Timestamp>,
}

impl SessionRecord {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.ended_at.is_none() && self.expires_at > now
    }
}

pub struct SessionRepo;

impl SessionRepo {
    pub async fn start(
        store: &Store,
        session_id: &str,
        user_id: &str,
        expires_at: Timestamp,
    ) -> SessionRecord {
        let record = SessionRecord {
            id: session_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            expires_at,
            ended_at: None,
        };
        store
            .write()
            .await
            .sessions
            .insert(record.id.clone(), record.clone());
        record
    }

    /// Whether `session_id` exists, belongs to `user_id`, and has neither
    /// ended nor expired.
    pub async fn is_active(store: &Store, session_id: &str, user_id: &str) -> bool {
        let now = Utc::now();
        store
            .read()
            .await
            .sessions
            .get(session_id)
            .is_some_and(|s| s.user_id == user_id && s.is_active(now))
    }

    /// End a session. Returns `false` if it was unknown or already ended.
    pub async fn end(store: &Store, session_id: &str) -> bool {
        let mut state = store.write().await;
        match state.sessions.get_mut(session_id) {
            Some(s) if s.ended_at.is_none() => {
                s.ended_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Drop ended and expired sessions. Returns the ids that were removed.
    pub async fn prune(store: &Store, now: Timestamp) -> Vec<String> {
        let mut state = store.write().await;
        let mut removed = Vec::new();
        state.sessions.retain(|id, s| {
            let keep = s.is_active(now);
            if !keep {
                removed.push(id.clone());
            }
            keep
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn session_lifecycle() {
        let store = Store::new();
        let expires = Utc::now() + Duration::hours(1);
        SessionRepo::start(&store, "s1", "u1", expires).await;

        assert!(SessionRepo::is_active(&store, "s1", "u1").await);
        assert!(!SessionRepo::is_active(&store, "s1", "someone-else").await);

        assert!(SessionRepo::end(&store, "s1").await);
        assert!(!SessionRepo::is_active(&store, "s1", "u1").await);
        assert!(!SessionRepo::end(&store, "s1").await);
    }

    #[tokio::test]
    async fn expired_sessions_are_inactive_until_pruned() {
        let store = Store::new();
        SessionRepo::start(&store, "old", "u1", Utc::now() - Duration::minutes(1)).await;
        assert!(!SessionRepo::is_active(&store, "old", "u1").await);

        // Starting another session leaves the stale record for the sweeper.
        SessionRepo::start(&store, "new", "u1", Utc::now() + Duration::hours(1)).await;
        assert!(store.read().await.sessions.contains_key("old"));
        assert_eq!(SessionRepo::prune(&store, Utc::now()).await, vec!["old".to_string()]);
    }

    #[tokio::test]
    async fn prune_drops_ended_and_expired_sessions() {
        let store = Store::new();
        let now = Utc::now();
        SessionRepo::start(&store, "live", "u1", now + Duration::hours(1)).await;
        SessionRepo::start(&store, "ended", "u1", now + Duration::hours(1)).await;
        SessionRepo::end(&store, "ended").await;

        let pruned = SessionRepo::prune(&store, now + Duration::minutes(1)).await;
        assert_eq!(pruned, vec!["ended".to_string()]);
        assert!(SessionRepo::is_active(&store, "live", "u1").await);

        let pruned = SessionRepo::prune(&store, now + Duration::hours(2)).await;
        assert_eq!(pruned, vec!["live".to_string()]);
        assert!(!SessionRepo::is_active(&store, "live", "u1").await);
    }
}
