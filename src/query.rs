//! Search, filter and sort over an in-memory catalog

use crate::models::CatalogEntity;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SortOption {
    /// Ascending id (catalog order)
    #[default]
    Id,
    /// Ascending name, case-insensitive
    Alphabetical,
    /// Highest first
    Attack,
    Defense,
    Speed,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Id => "id",
            SortOption::Alphabetical => "name",
            SortOption::Attack => "attack",
            SortOption::Defense => "defense",
            SortOption::Speed => "speed",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortOption::Id),
            "name" | "alphabetical" => Ok(SortOption::Alphabetical),
            "attack" => Ok(SortOption::Attack),
            "defense" => Ok(SortOption::Defense),
            "speed" => Ok(SortOption::Speed),
            other => Err(format!(
                "unknown sort key '{}' (expected id, name, attack, defense or speed)",
                other
            )),
        }
    }
}

/// Criteria for the list view
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    /// Type name, case-insensitive
    pub type_filter: Option<String>,
    pub favorites_only: bool,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn matches(&self, entity: &CatalogEntity) -> bool {
        if self.favorites_only && !entity.is_favorite {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() && !entity.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(kind) = self.type_filter.as_deref() {
            if !kind.trim().is_empty() && !entity.has_type(kind) {
                return false;
            }
        }
        true
    }

    /// Matching entities in the requested order
    pub fn apply<'a>(&self, entities: &'a [CatalogEntity]) -> Vec<&'a CatalogEntity> {
        let mut matched: Vec<&CatalogEntity> = entities.iter().filter(|e| self.matches(e)).collect();

        match self.sort {
            SortOption::Id => matched.sort_by_key(|e| e.id),
            SortOption::Alphabetical => matched.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            }),
            // Stat sorts: descending, then by id
            SortOption::Attack => matched.sort_by(|a, b| b.attack.cmp(&a.attack).then(a.id.cmp(&b.id))),
            SortOption::Defense => matched.sort_by(|a, b| b.defense.cmp(&a.defense).then(a.id.cmp(&b.id))),
            SortOption::Speed => matched.sort_by(|a, b| b.speed.cmp(&a.speed).then(a.id.cmp(&b.id))),
        }

        matched
    }
}

/// Distinct type names across the catalog, sorted
pub fn available_types(entities: &[CatalogEntity]) -> Vec<String> {
    entities
        .iter()
        .flat_map(|e| e.type_list())
        .map(str::to_lowercase)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
