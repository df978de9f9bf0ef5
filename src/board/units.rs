//! The set of combatants.
//!
//! Units are stored by `UnitId` and never removed from the vector; death
//! flips the `alive` flag so ids stay valid for event reports. Mutation is
//! crate-private and always routed through `Board`, which keeps the
//! occupancy index in step.

use super::position::Position;
use super::unit::{Faction, Unit, UnitId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitSet {
    units: Vec<Unit>,
}

impl UnitSet {
    /// Builds a unit set, assigning ids in reading order of position.
    pub(crate) fn new(mut units: Vec<Unit>) -> Self {
        units.sort_by_key(|u| u.position);
        for (i, unit) in units.iter_mut().enumerate() {
            unit.id = UnitId(i);
        }
        UnitSet { units }
    }

    pub fn get(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    /// Every unit ever deployed, dead ones included.
    pub fn all(&self) -> &[Unit] {
        &self.units
    }

    /// Living units in reading order.
    pub fn living(&self) -> Vec<&Unit> {
        let mut living: Vec<&Unit> = self.units.iter().filter(|u| u.alive).collect();
        living.sort_by_key(|u| u.position);
        living
    }

    /// Snapshot of whose turn it is this round: ids of living units in
    /// reading order of their current positions.
    pub fn turn_order(&self) -> Vec<UnitId> {
        self.living().into_iter().map(|u| u.id).collect()
    }

    /// Living units of `faction`.
    pub fn of_faction(&self, faction: Faction) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |u| u.alive && u.faction == faction)
    }

    /// Living units hostile to `faction`.
    pub fn enemies_of(&self, faction: Faction) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.is_enemy_of(faction))
    }

    pub fn has_enemies(&self, faction: Faction) -> bool {
        self.enemies_of(faction).next().is_some()
    }

    pub fn living_count(&self, faction: Faction) -> usize {
        self.of_faction(faction).count()
    }

    /// Sum of hit points over all living units.
    pub fn total_hit_points(&self) -> i64 {
        self.units
            .iter()
            .filter(|u| u.alive)
            .map(|u| i64::from(u.hit_points))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub(crate) fn set_position(&mut self, id: UnitId, to: Position) {
        self.units[id.0].position = to;
    }

    /// Subtracts `damage` and returns the hit points left.
    pub(crate) fn wound(&mut self, id: UnitId, damage: i32) -> i32 {
        let unit = &mut self.units[id.0];
        unit.hit_points -= damage;
        unit.hit_points
    }

    pub(crate) fn mark_dead(&mut self, id: UnitId) {
        let unit = &mut self.units[id.0];
        assert!(unit.alive, "unit {:?} died twice", id);
        unit.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UnitSet {
        UnitSet::new(vec![
            Unit::new(Faction::Goblin, Position::new(3, 1), 200, 3),
            Unit::new(Faction::Elf, Position::new(1, 4), 200, 3),
            Unit::new(Faction::Elf, Position::new(1, 2), 200, 3),
        ])
    }

    #[test]
    fn ids_follow_reading_order() {
        let set = sample();
        assert_eq!(set.get(UnitId(0)).position, Position::new(1, 2));
        assert_eq!(set.get(UnitId(1)).position, Position::new(1, 4));
        assert_eq!(set.get(UnitId(2)).faction, Faction::Goblin);
    }

    #[test]
    fn turn_order_tracks_current_positions() {
        let mut set = sample();
        set.set_position(UnitId(0), Position::new(2, 2));
        assert_eq!(set.turn_order(), vec![UnitId(1), UnitId(0), UnitId(2)]);
    }

    #[test]
    fn dead_units_drop_out() {
        let mut set = sample();
        assert_eq!(set.wound(UnitId(2), 250), -50);
        set.mark_dead(UnitId(2));
        assert!(!set.has_enemies(Faction::Elf));
        assert_eq!(set.living_count(Faction::Goblin), 0);
        assert_eq!(set.turn_order(), vec![UnitId(0), UnitId(1)]);
        assert_eq!(set.total_hit_points(), 400);
        assert_eq!(set.len(), 3);
    }

    #[test]
    #[should_panic(expected = "died twice")]
    fn double_death_is_fatal() {
        let mut set = sample();
        set.mark_dead(UnitId(0));
        set.mark_dead(UnitId(0));
    }
}
