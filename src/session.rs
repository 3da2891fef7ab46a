//! In-memory catalog held by the UI, with favorite toggling written back to the store
//!
//! The list here is a cache of the store, not the source of truth. A failed
//! write is logged and the in-memory flag is kept, so the two can diverge
//! until the next successful write or refresh.

use crate::error::Result;
use crate::models::CatalogEntity;
use crate::query::CatalogQuery;
use crate::store::CatalogStore;
use std::sync::Arc;

pub struct CatalogSession<S: CatalogStore + 'static> {
    entities: Vec<CatalogEntity>,
    store: Arc<S>,
}

impl<S: CatalogStore + 'static> CatalogSession<S> {
    pub fn new(entities: Vec<CatalogEntity>, store: Arc<S>) -> Self {
        Self { entities, store }
    }

    pub fn entities(&self) -> &[CatalogEntity] {
        &self.entities
    }

    pub fn get(&self, id: i64) -> Option<&CatalogEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Swap in a freshly loaded catalog
    pub fn replace(&mut self, entities: Vec<CatalogEntity>) {
        self.entities = entities;
    }

    /// Filtered and sorted view over the current list
    pub fn query(&self, query: &CatalogQuery) -> Vec<&CatalogEntity> {
        query.apply(&self.entities)
    }

    /// Flip the favorite flag of `id` and persist the new value.
    ///
    /// Returns the new value, or `None` if no entity has that id.
    pub async fn toggle_favorite(&mut self, id: i64) -> Option<bool> {
        let entity = self.entities.iter_mut().find(|e| e.id == id)?;
        entity.is_favorite = !entity.is_favorite;
        let value = entity.is_favorite;

        if let Err(e) = self.persist_favorite(id, value).await {
            log::warn!("Failed to persist favorite for {}: {}", id, e);
        }
        Some(value)
    }

    async fn persist_favorite(&self, id: i64, value: bool) -> Result<()> {
        let store = Arc::clone(&self.store);
        let found = tokio::task::spawn_blocking(move || store.set_favorite(id, value)).await??;
        if found {
            log::info!("Favorite for {} set to {}", id, value);
        } else {
            log::debug!("Favorite for {} only kept in memory: not in store", id);
        }
        Ok(())
    }
}
