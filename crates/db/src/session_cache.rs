//! Key-value cache holding the profile of each live session.
//!
//! Every facade mutation writes the caller's profile through to this cache
//! so a session can be restored without logging in again. It is not the
//! store of record: entries may be stale and losing them only costs a
//! fresh login.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mentorhub_core::profile::UserProfile;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum SessionCacheError {
    #[error("Invalid session key '{0}'")]
    InvalidKey(String),

    #[error("Session cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session cache entry: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionCache: Send + Sync {
    async fn put(&self, key: &str, profile: &UserProfile) -> Result<(), SessionCacheError>;
    async fn get(&self, key: &str) -> Result<Option<UserProfile>, SessionCacheError>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SessionCacheError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local cache. Used when no cache directory is configured.
#[derive(Default)]
pub struct MemorySessionCache {
    entries: RwLock<HashMap<String, UserProfile>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for MemorySessionCache {
    async fn put(&self, key: &str, profile: &UserProfile) -> Result<(), SessionCacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), profile.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<UserProfile>, SessionCacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionCacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// One JSON file per session under a directory. Survives restarts.
pub struct FileSessionCache {
    dir: PathBuf,
}

impl FileSessionCache {
    /// Create the cache, creating `dir` if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, SessionCacheError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SessionCacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionCacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionCache for FileSessionCache {
    async fn put(&self, key: &str, profile: &UserProfile) -> Result<(), SessionCacheError> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec(profile)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<UserProfile>, SessionCacheError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), SessionCacheError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mentorhub_core::roles::Role;

    use super::*;

    async fn exercise(cache: &dyn SessionCache) {
        let profile = UserProfile::new_for_email("a@x.com", Some(Role::Mentee));

        assert!(cache.get("s1").await.unwrap().is_none());
        cache.put("s1", &profile).await.unwrap();
        assert_eq!(cache.get("s1").await.unwrap(), Some(profile));

        cache.remove("s1").await.unwrap();
        assert!(cache.get("s1").await.unwrap().is_none());
        cache.remove("s1").await.unwrap();
    }

    #[tokio::test]
    async fn memory_cache_put_get_remove() {
        exercise(&MemorySessionCache::new()).await;
    }

    #[tokio::test]
    async fn file_cache_put_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileSessionCache::open(dir.path()).await.unwrap()).await;
    }

    #[tokio::test]
    async fn file_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let profile = UserProfile::new_for_email("b@x.com", None);

        FileSessionCache::open(dir.path())
            .await
            .unwrap()
            .put("abc", &profile)
            .await
            .unwrap();

        let reopened = FileSessionCache::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get("abc").await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn file_cache_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileSessionCache::open(dir.path()).await.unwrap();
        assert_matches!(
            cache.get("../etc/passwd").await,
            Err(SessionCacheError::InvalidKey(_))
        );
    }
}
