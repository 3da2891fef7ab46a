//! Catalog fetch pipeline
//!
//! Store first; on a miss the listing is fetched, details are fetched
//! concurrently (bounded by a semaphore), merged, validated, written back
//! and returned. A failed listing aborts the load. A failed detail only
//! drops that entry.

use crate::api::PokeApiClient;
use crate::cache::{CachePolicy, LoadMode};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::merge::{merge_entry, validate_and_dedup};
use crate::models::{CatalogEntity, EntryReference};
use crate::store::CatalogStore;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub struct FetchPipeline<S: CatalogStore + 'static> {
    client: PokeApiClient,
    store: Arc<S>,
    policy: CachePolicy,
    limit: u32,
    max_id: i64,
    max_in_flight: usize,
}

impl<S: CatalogStore + 'static> FetchPipeline<S> {
    pub fn new(client: PokeApiClient, store: Arc<S>, config: &CatalogConfig) -> Self {
        Self {
            client,
            store,
            policy: CachePolicy,
            limit: config.limit,
            max_id: config.max_id,
            max_in_flight: config.max_in_flight.max(1),
        }
    }

    pub fn from_config(config: &CatalogConfig, store: Arc<S>) -> Self {
        Self::new(PokeApiClient::from_config(config), store, config)
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stored catalog if any, otherwise a network refresh
    pub async fn load_catalog(&self) -> Result<Vec<CatalogEntity>> {
        self.load(LoadMode::CacheFirst).await
    }

    /// Fetch from the network regardless of stored rows, then replace them
    pub async fn refresh(&self) -> Result<Vec<CatalogEntity>> {
        self.load(LoadMode::Refresh).await
    }

    pub async fn load(&self, mode: LoadMode) -> Result<Vec<CatalogEntity>> {
        let store = Arc::clone(&self.store);
        let policy = self.policy;
        let cached = tokio::task::spawn_blocking(move || policy.read(store.as_ref(), mode))
            .await
            .unwrap_or_else(|e| {
                log::warn!("Cache read task failed, fetching instead: {}", e);
                None
            });
        if let Some(rows) = cached {
            return Ok(rows);
        }

        let entries = self.client.fetch_listing(self.limit).await?;
        let requested = entries.len();
        let merged = self.fetch_details(entries).await;
        let entities = validate_and_dedup(merged, self.max_id);
        log::info!(
            "Fetched {} of {} catalog entries",
            entities.len(),
            requested
        );

        let store = Arc::clone(&self.store);
        let rows = entities.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || policy.write(store.as_ref(), &rows)).await {
            log::warn!("Cache write task failed: {}", e);
        }

        Ok(entities)
    }

    /// Fetch and merge a single entry without touching the store
    pub async fn fetch_entity(&self, entry: &EntryReference) -> Result<CatalogEntity> {
        let detail = self.client.fetch_detail(&entry.url).await?;
        Ok(merge_entry(entry, &detail)?)
    }

    /// Fan out one detail request per entry, collecting merged results in completion order
    async fn fetch_details(&self, entries: Vec<EntryReference>) -> Vec<CatalogEntity> {
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for entry in entries {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // Never closed; the permit is held until the request finishes
                let _permit = semaphore.acquire_owned().await.ok();
                let result = client.fetch_detail(&entry.url).await;
                (entry, result)
            });
        }

        let mut merged = Vec::new();
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((entry, Ok(detail))) => match merge_entry(&entry, &detail) {
                    Ok(entity) => merged.push(entity),
                    Err(e) => {
                        log::warn!("Skipping {}: {}", entry.url, e);
                        failed += 1;
                    }
                },
                Ok((entry, Err(e))) => {
                    log::warn!("Failed to fetch detail for {}: {}", entry.name, e);
                    failed += 1;
                }
                Err(e) => {
                    log::warn!("Detail task failed: {}", e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            log::warn!("{} detail requests failed and were skipped", failed);
        }
        merged
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
