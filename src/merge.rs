//! Merging listing entries with their detail payloads, and batch validation
//!
//! Both steps are pure so they can be tested without network or storage.

use crate::error::MergeError;
use crate::models::{sprite_url, CatalogEntity, DetailRecord, EntryReference};
use std::collections::HashSet;

/// Highest id accepted from the first-generation listing
pub const DEFAULT_MAX_ID: i64 = 151;

/// Stat names looked up in the detail payload
pub mod stat_names {
    pub const HP: &str = "hp";
    pub const ATTACK: &str = "attack";
    pub const DEFENSE: &str = "defense";
    pub const SPEED: &str = "speed";
}

/// Merge a listing entry with its detail payload.
///
/// The detail's id is authoritative. Stats are looked up by name and
/// a missing stat counts as 0; response order is never relied on.
pub fn merge_entry(
    entry: &EntryReference,
    detail: &DetailRecord,
) -> Result<CatalogEntity, MergeError> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(MergeError::EmptyName { id: detail.id });
    }

    let stat = |name: &str| detail.stat(name).unwrap_or(0);

    Ok(CatalogEntity {
        id: detail.id,
        name: name.to_string(),
        image_url: sprite_url(detail.id),
        types: detail.types.join(","),
        hp: stat(stat_names::HP),
        attack: stat(stat_names::ATTACK),
        defense: stat(stat_names::DEFENSE),
        speed: stat(stat_names::SPEED),
        is_favorite: false,
    })
}

/// True when `id` lies in `[1, max_id]`
pub fn id_in_range(id: i64, max_id: i64) -> bool {
    id > 0 && id <= max_id
}

/// Drop out-of-range ids and duplicate ids (first seen wins), then sort by id
pub fn validate_and_dedup(entities: Vec<CatalogEntity>, max_id: i64) -> Vec<CatalogEntity> {
    let mut seen = HashSet::new();
    let mut kept: Vec<CatalogEntity> = Vec::with_capacity(entities.len());
    let mut out_of_range = 0;
    let mut duplicates = 0;

    for entity in entities {
        if !id_in_range(entity.id, max_id) {
            out_of_range += 1;
            continue;
        }
        if !seen.insert(entity.id) {
            duplicates += 1;
            continue;
        }
        kept.push(entity);
    }

    if out_of_range > 0 || duplicates > 0 {
        log::warn!(
            "Dropped {} out-of-range and {} duplicate entries",
            out_of_range,
            duplicates
        );
    }

    kept.sort_by_key(|e| e.id);
    kept
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
