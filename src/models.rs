//! Catalog data model: listing references, detail payloads and the persisted entity

use serde::{Deserialize, Serialize};

/// Sprite host; image URLs are synthesized from the id rather than taken from the API
const SPRITE_BASE_URL: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Image URL for a catalog id
pub fn sprite_url(id: i64) -> String {
    format!("{}/{}.png", SPRITE_BASE_URL, id)
}

/// Listing item: a name plus the URL of its detail resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryReference {
    pub name: String,
    pub url: String,
}

impl EntryReference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Id parsed from the last non-empty path segment of the URL, 0 if it is not an integer
    pub fn id(&self) -> i64 {
        self.url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(0)
    }
}

/// Listing response: `{ results: [{name, url}] }`
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub results: Vec<EntryReference>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    base_stat: i64,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    name: String,
}

/// Wire shape of the detail endpoint; unknown fields are ignored
#[derive(Debug, Deserialize)]
pub struct DetailPayload {
    id: i64,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

/// Per-entry detail: type names and (stat name, base value) pairs, in response order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "DetailPayload")]
pub struct DetailRecord {
    pub id: i64,
    pub types: Vec<String>,
    pub stats: Vec<(String, i64)>,
}

impl From<DetailPayload> for DetailRecord {
    fn from(payload: DetailPayload) -> Self {
        Self {
            id: payload.id,
            types: payload.types.into_iter().map(|t| t.kind.name).collect(),
            stats: payload
                .stats
                .into_iter()
                .map(|s| (s.stat.name, s.base_stat))
                .collect(),
        }
    }
}

impl DetailRecord {
    /// Base value of the named stat, first match wins
    pub fn stat(&self, name: &str) -> Option<i64> {
        self.stats
            .iter()
            .find(|(stat_name, _)| stat_name == name)
            .map(|(_, value)| *value)
    }
}

/// Merged, persisted representation of a catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    /// Type names joined with ","
    pub types: String,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub is_favorite: bool,
}

impl CatalogEntity {
    /// Individual type names
    pub fn type_list(&self) -> impl Iterator<Item = &str> {
        self.types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Case-insensitive type membership
    pub fn has_type(&self, kind: &str) -> bool {
        let kind = kind.trim();
        self.type_list().any(|t| t.eq_ignore_ascii_case(kind))
    }

    /// Name with its first letter capitalized ("bulbasaur" -> "Bulbasaur")
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Sum of the four tracked stats, widened so any i64 values fit
    pub fn total_stats(&self) -> i128 {
        [self.hp, self.attack, self.defense, self.speed]
            .iter()
            .map(|&stat| i128::from(stat))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(types: &str) -> CatalogEntity {
        CatalogEntity {
            id: 1,
            name: "bulbasaur".to_string(),
            image_url: sprite_url(1),
            types: types.to_string(),
            hp: 45,
            attack: 49,
            defense: 49,
            speed: 45,
            is_favorite: false,
        }
    }

    #[test]
    fn entry_id_from_trailing_slash_url() {
        let entry = EntryReference::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
        assert_eq!(entry.id(), 25);
    }

    #[test]
    fn entry_id_without_trailing_slash() {
        let entry = EntryReference::new("mew", "https://pokeapi.co/api/v2/pokemon/151");
        assert_eq!(entry.id(), 151);
    }

    #[test]
    fn entry_id_defaults_to_zero() {
        assert_eq!(EntryReference::new("x", "not-a-url").id(), 0);
        assert_eq!(EntryReference::new("x", "").id(), 0);
        assert_eq!(EntryReference::new("x", "https://pokeapi.co/api/v2/pokemon/abc/").id(), 0);
    }

    #[test]
    fn entry_id_is_stable_for_same_url() {
        let a = EntryReference::new("a", "https://pokeapi.co/api/v2/pokemon/7/");
        let b = EntryReference::new("b", "https://pokeapi.co/api/v2/pokemon/7/");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn listing_response_deserializes() {
        let json = r#"{
            "count": 1302,
            "next": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let listing: ListingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.results.len(), 2);
        assert_eq!(listing.results[1].name, "ivysaur");
        assert_eq!(listing.results[1].id(), 2);
    }

    #[test]
    fn detail_record_flattens_payload() {
        let json = r#"{
            "id": 1,
            "name": "bulbasaur",
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "u"}},
                {"slot": 2, "type": {"name": "poison", "url": "u"}}
            ],
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp"}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack"}}
            ]
        }"#;

        let detail: DetailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id, 1);
        assert_eq!(detail.types, vec!["grass", "poison"]);
        assert_eq!(detail.stat("hp"), Some(45));
        assert_eq!(detail.stat("attack"), Some(49));
        assert_eq!(detail.stat("speed"), None);
    }

    #[test]
    fn detail_record_rejects_missing_id() {
        let json = r#"{"types": [], "stats": []}"#;
        assert!(serde_json::from_str::<DetailRecord>(json).is_err());
    }

    #[test]
    fn entity_type_helpers() {
        let e = entity("grass,poison");
        assert_eq!(e.type_list().collect::<Vec<_>>(), vec!["grass", "poison"]);
        assert!(e.has_type("Poison"));
        assert!(!e.has_type("fire"));
        assert_eq!(entity("").type_list().count(), 0);
    }

    #[test]
    fn total_stats_widens_past_i64() {
        let mut e = entity("grass");
        assert_eq!(e.total_stats(), 188);
        e.hp = i64::MAX;
        e.attack = i64::MAX;
        assert_eq!(e.total_stats(), 2 * i128::from(i64::MAX) + 49 + 45);
    }

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(entity("grass").display_name(), "Bulbasaur");
    }

    #[test]
    fn sprite_url_uses_id() {
        assert_eq!(
            sprite_url(25),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
        );
    }
}
