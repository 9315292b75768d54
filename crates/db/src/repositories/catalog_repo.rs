//! Repository for group sessions and webinars.
//!
//! Both catalogs share one generic repository; [`CatalogTable`] picks the
//! backing map for each record type. Insertion order is preserved.

use indexmap::IndexMap;
use mentorhub_core::catalog::{CatalogItem, GroupSession, Webinar};
use mentorhub_core::error::CoreError;
use mentorhub_core::types::EntityId;

use crate::store::{Store, StoreState};

/// Maps a catalog record type to its table in the store.
pub trait CatalogTable: CatalogItem + 'static {
    #[doc(hidden)]
    fn table(state: &StoreState) -> &IndexMap<EntityId, Self>;
    #[doc(hidden)]
    fn table_mut(state: &mut StoreState) -> &mut IndexMap<EntityId, Self>;
}

impl CatalogTable for GroupSession {
    fn table(state: &StoreState) -> &IndexMap<EntityId, Self> {
        &state.group_sessions
    }

    fn table_mut(state: &mut StoreState) -> &mut IndexMap<EntityId, Self> {
        &mut state.group_sessions
    }
}

impl CatalogTable for Webinar {
    fn table(state: &StoreState) -> &IndexMap<EntityId, Self> {
        &state.webinars
    }

    fn table_mut(state: &mut StoreState) -> &mut IndexMap<EntityId, Self> {
        &mut state.webinars
    }
}

pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn list<T: CatalogTable>(store: &Store) -> Vec<T> {
        T::table(&*store.read().await).values().cloned().collect()
    }

    pub async fn find<T: CatalogTable>(store: &Store, id: &str) -> Option<T> {
        T::table(&*store.read().await).get(id).cloned()
    }

    /// Insert a new record. An existing id is a conflict.
    pub async fn create<T: CatalogTable>(store: &Store, item: T) -> Result<T, CoreError> {
        let mut state = store.write().await;
        let table = T::table_mut(&mut state);
        if table.contains_key(item.id()) {
            return Err(CoreError::Conflict(format!(
                "{} '{}' already exists",
                T::ENTITY,
                item.id()
            )));
        }
        table.insert(item.id().to_string(), item.clone());
        tracing::info!(entity = T::ENTITY, id = item.id(), host_id = item.host_id(), "Catalog item created");
        Ok(item)
    }

    /// Delete a record owned by `requester_id`.
    pub async fn delete<T: CatalogTable>(
        store: &Store,
        id: &str,
        requester_id: &str,
    ) -> Result<T, CoreError> {
        let mut state = store.write().await;
        let table = T::table_mut(&mut state);
        let item = table
            .get(id)
            .ok_or_else(|| CoreError::not_found(T::ENTITY, id))?;
        if item.host_id() != requester_id {
            return Err(CoreError::Forbidden(format!(
                "Only the host can delete this {}",
                T::ENTITY
            )));
        }
        let removed = table
            .shift_remove(id)
            .ok_or_else(|| CoreError::not_found(T::ENTITY, id))?;
        tracing::info!(entity = T::ENTITY, id, "Catalog item deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mentorhub_core::catalog::{CreateGroupSession, CreateWebinar};

    use super::*;

    fn session(title: &str, host: &str) -> GroupSession {
        CreateGroupSession {
            title: title.into(),
            description: "desc".into(),
            date: "2030-01-01T10:00:00Z".into(),
            tags: vec!["career".into()],
            image_url: None,
            max_participants: Some(10),
            price: None,
            duration: Some("60 min".into()),
        }
        .into_record(host, "Host")
    }

    #[tokio::test]
    async fn create_then_list_preserves_order() {
        let store = Store::new();
        let a = CatalogRepo::create(&store, session("A", "h1")).await.unwrap();
        let b = CatalogRepo::create(&store, session("B", "h1")).await.unwrap();

        let listed: Vec<GroupSession> = CatalogRepo::list(&store).await;
        assert_eq!(listed, vec![a.clone(), b]);
        assert_eq!(CatalogRepo::find::<GroupSession>(&store, &a.id).await, Some(a));
        assert!(CatalogRepo::list::<Webinar>(&store).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_conflicts() {
        let store = Store::new();
        let a = CatalogRepo::create(&store, session("A", "h1")).await.unwrap();
        assert_matches!(
            CatalogRepo::create(&store, a).await,
            Err(CoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn delete_is_owner_only() {
        let store = Store::new();
        let w = CreateWebinar {
            title: "W".into(),
            description: "d".into(),
            date: "2030-02-01".into(),
            tags: vec![],
            image_url: None,
            duration: None,
        }
        .into_record("owner", "Owner");
        let w = CatalogRepo::create(&store, w).await.unwrap();

        assert_matches!(
            CatalogRepo::delete::<Webinar>(&store, &w.id, "intruder").await,
            Err(CoreError::Forbidden(_))
        );
        assert!(CatalogRepo::find::<Webinar>(&store, &w.id).await.is_some());

        CatalogRepo::delete::<Webinar>(&store, &w.id, "owner").await.unwrap();
        assert_matches!(
            CatalogRepo::delete::<Webinar>(&store, &w.id, "owner").await,
            Err(CoreError::NotFound { entity: "Webinar", .. })
        );
    }
}
