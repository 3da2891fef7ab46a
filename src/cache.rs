//! Read-through cache rules around the local store
//!
//! - read: stored rows if there are any, otherwise a miss (storage errors count as a miss)
//! - write: always replace the full table
//! - invalidate: only by an explicit refresh; stored rows never expire

use crate::models::CatalogEntity;
use crate::store::CatalogStore;

/// How a load chooses between the store and the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Serve stored rows whenever any exist
    #[default]
    CacheFirst,
    /// Manual invalidation: skip the store and fetch
    Refresh,
}

/// Stateless cache policy
#[derive(Debug, Clone, Copy, Default)]
pub struct CachePolicy;

impl CachePolicy {
    /// Stored rows to serve, or `None` to fall through to the network
    pub fn read<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        mode: LoadMode,
    ) -> Option<Vec<CatalogEntity>> {
        if mode == LoadMode::Refresh {
            log::info!("Refresh requested, bypassing cached catalog");
            return None;
        }

        match store.load_all() {
            Ok(rows) if !rows.is_empty() => {
                log::info!("Cache hit: {} stored entries", rows.len());
                Some(rows)
            }
            Ok(_) => {
                log::info!("Cache miss: store is empty");
                None
            }
            Err(e) => {
                log::warn!("Failed to read cached catalog, fetching instead: {}", e);
                None
            }
        }
    }

    /// Replace the stored rows; a failure is logged and reported as `false`
    pub fn write<S: CatalogStore + ?Sized>(&self, store: &S, entities: &[CatalogEntity]) -> bool {
        match store.replace_all(entities) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to store catalog, keeping fetched result: {}", e);
                false
            }
        }
    }
}
