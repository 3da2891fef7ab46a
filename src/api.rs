//! PokeAPI client for the listing and detail endpoints
//!
//! Uses async reqwest. Bodies are read as bytes and decoded with serde_json
//! so that transport and decode failures stay distinguishable.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::models::{DetailRecord, EntryReference, ListingResponse};
use serde::de::DeserializeOwned;

/// Thin client over a shared `reqwest::Client`; cheap to clone
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            ..Self::new(config.base_url.clone())
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the first `limit` listing entries
    pub async fn fetch_listing(&self, limit: u32) -> Result<Vec<EntryReference>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        log::info!("Fetching listing: {}", url);

        let listing: ListingResponse = self.get_json(&url).await?;
        log::info!("Listing returned {} entries", listing.results.len());
        Ok(listing.results)
    }

    /// Fetch a detail record; the URL is used verbatim from the listing entry
    pub async fn fetch_detail(&self, url: &str) -> Result<DetailRecord> {
        log::debug!("Fetching detail: {}", url);
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
