//! Stat-total battle between two catalog entries

use crate::models::CatalogEntity;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Battle score: hp + attack + defense + speed
pub fn score(entity: &CatalogEntity) -> i128 {
    entity.total_stats()
}

/// Returns `a` only if it scores strictly higher; ties go to `b`.
pub fn decide_winner<'a>(a: &'a CatalogEntity, b: &'a CatalogEntity) -> &'a CatalogEntity {
    // TODO: confirm whether a tie should be a draw instead of a win for `b`
    if score(a) > score(b) {
        a
    } else {
        b
    }
}

/// Both scores plus the winner, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome<'a> {
    pub player: &'a CatalogEntity,
    pub opponent: &'a CatalogEntity,
    pub player_score: i128,
    pub opponent_score: i128,
    pub winner: &'a CatalogEntity,
}

impl<'a> BattleOutcome<'a> {
    pub fn is_tie(&self) -> bool {
        self.player_score == self.opponent_score
    }
}

pub fn battle<'a>(player: &'a CatalogEntity, opponent: &'a CatalogEntity) -> BattleOutcome<'a> {
    BattleOutcome {
        player,
        opponent,
        player_score: score(player),
        opponent_score: score(opponent),
        winner: decide_winner(player, opponent),
    }
}

/// Uniformly random opponent; `None` for an empty catalog
pub fn random_opponent<'a, R: Rng + ?Sized>(
    entities: &'a [CatalogEntity],
    rng: &mut R,
) -> Option<&'a CatalogEntity> {
    entities.choose(rng)
}
