//! Tests for merge and batch validation

use super::*;

fn detail(id: i64, stats: &[(&str, i64)]) -> DetailRecord {
    DetailRecord {
        id,
        types: vec!["grass".to_string(), "poison".to_string()],
        stats: stats.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
    }
}

fn entity(id: i64, name: &str) -> CatalogEntity {
    CatalogEntity {
        id,
        name: name.to_string(),
        image_url: sprite_url(id),
        types: "normal".to_string(),
        hp: 10,
        attack: 10,
        defense: 10,
        speed: 10,
        is_favorite: false,
    }
}

// ── merge_entry ──────────────────────────────────────────────────────

#[test]
fn merge_builds_entity_from_detail() {
    let entry = EntryReference::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/");
    let d = detail(
        1,
        &[
            ("hp", 45),
            ("attack", 49),
            ("defense", 49),
            ("special-attack", 65),
            ("special-defense", 65),
            ("speed", 45),
        ],
    );

    let merged = merge_entry(&entry, &d).unwrap();
    assert_eq!(merged.id, 1);
    assert_eq!(merged.name, "bulbasaur");
    assert_eq!(merged.types, "grass,poison");
    assert_eq!((merged.hp, merged.attack, merged.defense, merged.speed), (45, 49, 49, 45));
    assert_eq!(merged.image_url, sprite_url(1));
    assert!(!merged.is_favorite);
}

#[test]
fn merge_looks_up_stats_by_name_not_position() {
    let entry = EntryReference::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
    let d = detail(25, &[("speed", 90), ("defense", 40), ("hp", 35), ("attack", 55)]);

    let merged = merge_entry(&entry, &d).unwrap();
    assert_eq!(merged.hp, 35);
    assert_eq!(merged.attack, 55);
    assert_eq!(merged.defense, 40);
    assert_eq!(merged.speed, 90);
}

#[test]
fn merge_defaults_missing_stats_to_zero() {
    let entry = EntryReference::new("ditto", "https://pokeapi.co/api/v2/pokemon/132/");
    let merged = merge_entry(&entry, &detail(132, &[("hp", 48)])).unwrap();
    assert_eq!(merged.hp, 48);
    assert_eq!(merged.attack, 0);
    assert_eq!(merged.defense, 0);
    assert_eq!(merged.speed, 0);
}

#[test]
fn merge_uses_detail_id_over_url_id() {
    let entry = EntryReference::new("mew", "https://pokeapi.co/api/v2/pokemon/999/");
    let merged = merge_entry(&entry, &detail(151, &[])).unwrap();
    assert_eq!(merged.id, 151);
    assert_eq!(merged.image_url, sprite_url(151));
}

#[test]
fn merge_rejects_empty_name() {
    let entry = EntryReference::new("  ", "https://pokeapi.co/api/v2/pokemon/4/");
    assert_eq!(
        merge_entry(&entry, &detail(4, &[])),
        Err(MergeError::EmptyName { id: 4 })
    );
}

// ── validate_and_dedup ───────────────────────────────────────────────

#[test]
fn validate_applies_id_boundaries() {
    let input = vec![entity(0, "zero"), entity(1, "one"), entity(151, "last"), entity(152, "over")];
    let ids: Vec<i64> = validate_and_dedup(input, DEFAULT_MAX_ID)
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![1, 151]);
}

#[test]
fn validate_drops_negative_ids() {
    assert!(validate_and_dedup(vec![entity(-3, "neg")], DEFAULT_MAX_ID).is_empty());
}

#[test]
fn dedup_keeps_first_seen() {
    let input = vec![entity(5, "first"), entity(3, "other"), entity(5, "second")];
    let result = validate_and_dedup(input, DEFAULT_MAX_ID);
    assert_eq!(result.len(), 2);
    let five = result.iter().find(|e| e.id == 5).unwrap();
    assert_eq!(five.name, "first");
}

#[test]
fn validate_sorts_ascending() {
    let input = vec![entity(9, "c"), entity(2, "a"), entity(4, "b")];
    let ids: Vec<i64> = validate_and_dedup(input, DEFAULT_MAX_ID)
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![2, 4, 9]);
}

#[test]
fn validate_respects_custom_max_id() {
    let input = vec![entity(10, "a"), entity(11, "b")];
    assert_eq!(validate_and_dedup(input, 10).len(), 1);
}
