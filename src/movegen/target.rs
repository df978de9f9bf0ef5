//! Goal cells and attack targets.

use std::collections::BTreeSet;

use crate::board::{Board, Position, UnitId};

/// Picks the adjacent enemy `unit` should attack: fewest hit points, ties
/// broken by reading order of the enemy's position.
pub fn attack_target(board: &Board, unit: UnitId) -> Option<UnitId> {
    let me = board.unit(unit);
    me.position
        .neighbors4()
        .filter_map(|pos| board.unit_at(pos))
        .filter(|other| other.is_enemy_of(me.faction))
        .min_by_key(|other| (other.hit_points, other.position))
        .map(|other| other.id)
}

/// True if `unit` stands next to at least one living enemy.
pub fn in_range_of_enemy(board: &Board, unit: UnitId) -> bool {
    attack_target(board, unit).is_some()
}

/// The open cells orthogonally adjacent to any living enemy of `unit`,
/// in reading order.
pub fn goal_cells(board: &Board, unit: UnitId) -> BTreeSet<Position> {
    let faction = board.unit(unit).faction;
    board
        .units()
        .enemies_of(faction)
        .flat_map(|enemy| board.open_neighbors(enemy.position))
        .collect()
}
