//! Runtime configuration

use crate::merge::DEFAULT_MAX_ID;
use std::path::PathBuf;

/// PokeAPI v2 root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of listing entries requested per refresh
pub const DEFAULT_LIMIT: u32 = 151;

/// Cap on concurrent detail requests
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;

pub const DEFAULT_USER_AGENT: &str = "pokedex_sync/0.1";

/// Settings for the client, the pipeline and the store location
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub limit: u32,
    /// Highest id kept after merging; anything above is dropped
    pub max_id: i64,
    pub max_in_flight: usize,
    pub user_agent: String,
    pub db_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            max_id: DEFAULT_MAX_ID,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            db_path: default_db_path(),
        }
    }
}

impl CatalogConfig {
    /// Default config pointed at another API root (used with mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Returns the default database path: ~/.local/share/pokedex_sync/catalog.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokedex_sync")
        .join("catalog.db")
}
