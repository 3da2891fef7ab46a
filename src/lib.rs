//! Pokedex Sync - PokeAPI catalog with a local SQLite cache
//!
//! Fetches the first-generation catalog (listing plus per-entry detail),
//! stores it locally, and serves search, favorites and stat battles from it.

pub mod api;
pub mod battle;
pub mod cache;
pub mod config;
pub mod error;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod session;
pub mod store;

pub use api::PokeApiClient;
pub use battle::{battle, decide_winner, random_opponent, score, BattleOutcome};
pub use cache::{CachePolicy, LoadMode};
pub use config::CatalogConfig;
pub use error::{CatalogError, MergeError, Result};
pub use merge::{merge_entry, validate_and_dedup};
pub use models::{CatalogEntity, DetailRecord, EntryReference};
pub use pipeline::FetchPipeline;
pub use query::{available_types, CatalogQuery, SortOption};
pub use session::CatalogSession;
pub use store::{CatalogStore, MemoryStore, SqliteStore};
