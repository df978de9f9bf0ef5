//! Board state.
//!
//! `Board` is the single owner of everything that changes during combat:
//! unit positions, hit points, and the occupancy index over the terrain.
//! Units never hold a reference to the grid; every move and every death
//! goes through here so occupancy and unit positions cannot disagree.

use serde::Serialize;
use tracing::{debug, trace};

use super::position::Position;
use super::terrain::Terrain;
use super::unit::{Armament, Faction, Placement, Unit, UnitId};
use super::units::UnitSet;

/// Errors raised when a board is assembled from inconsistent parts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no units to deploy")]
    NoUnits,

    #[error("unit at {0} is outside the {1}x{2} grid")]
    OutOfBounds(Position, usize, usize),

    #[error("unit at {0} stands on a wall")]
    OnWall(Position),

    #[error("two units share cell {0}")]
    Overlap(Position),

    #[error("unit at {0} starts with {1} hit points")]
    NotAlive(Position, i32),

    #[error("unit at {0} has negative attack power {1}")]
    NegativeAttack(Position, i32),
}

/// The outcome of one unit striking another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attack {
    pub attacker: UnitId,
    pub target: UnitId,
    pub damage: i32,
    pub hp_before: i32,
    pub killed: bool,
}

impl Attack {
    /// Hit points actually removed from the living pool. Overkill on the
    /// final blow is not counted.
    pub fn hp_lost(&self) -> i64 {
        i64::from(self.damage.min(self.hp_before))
    }
}

/// Living count and hit-point total for one faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FactionStats {
    pub units: usize,
    pub hit_points: i64,
}

/// Per-faction summary of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoardStats {
    pub elves: FactionStats,
    pub goblins: FactionStats,
}

/// Terrain plus the live unit set and an occupancy index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    terrain: Terrain,
    units: UnitSet,
    occupancy: Vec<Option<UnitId>>,
}

impl Board {
    /// Assembles a board, rejecting unit sets that violate the occupancy
    /// invariants.
    pub fn new(terrain: Terrain, units: Vec<Unit>) -> Result<Self, SetupError> {
        if units.is_empty() {
            return Err(SetupError::NoUnits);
        }

        let units = UnitSet::new(units);
        let mut occupancy = vec![None; terrain.width() * terrain.height()];

        for unit in units.all() {
            let idx = terrain.index(unit.position).ok_or(SetupError::OutOfBounds(
                unit.position,
                terrain.width(),
                terrain.height(),
            ))?;
            if !terrain.is_floor(unit.position) {
                return Err(SetupError::OnWall(unit.position));
            }
            if unit.hit_points <= 0 || !unit.alive {
                return Err(SetupError::NotAlive(unit.position, unit.hit_points));
            }
            if unit.attack_power < 0 {
                return Err(SetupError::NegativeAttack(unit.position, unit.attack_power));
            }
            if occupancy[idx].is_some() {
                return Err(SetupError::Overlap(unit.position));
            }
            occupancy[idx] = Some(unit.id);
        }

        Ok(Board {
            terrain,
            units,
            occupancy,
        })
    }

    /// Equips every placement with `armament` and assembles the board.
    pub fn deploy(
        terrain: Terrain,
        placements: &[Placement],
        armament: &Armament,
    ) -> Result<Self, SetupError> {
        let units = placements.iter().map(|p| armament.equip(*p)).collect();
        Board::new(terrain, units)
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn units(&self) -> &UnitSet {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        self.units.get(id)
    }

    /// Returns the living unit standing on `pos`, if any.
    pub fn unit_at(&self, pos: Position) -> Option<&Unit> {
        let idx = self.terrain.index(pos)?;
        self.occupancy[idx].map(|id| self.units.get(id))
    }

    /// True if `pos` is floor and no living unit stands on it.
    pub fn is_open(&self, pos: Position) -> bool {
        match self.terrain.index(pos) {
            Some(idx) => self.terrain.is_floor(pos) && self.occupancy[idx].is_none(),
            None => false,
        }
    }

    /// The open orthogonal neighbours of `pos`, in canonical order.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors4().filter(move |n| self.is_open(*n))
    }

    /// Moves a living unit one step into an adjacent open cell.
    ///
    /// Panics if the move would break the occupancy invariant; a caller
    /// asking for such a move is a bug, not a game state.
    pub fn move_unit(&mut self, id: UnitId, to: Position) {
        let from = self.units.get(id).position;
        assert!(self.units.get(id).alive, "dead unit {:?} cannot move", id);
        assert!(from.is_adjacent(to), "unit {:?} cannot jump {} -> {}", id, from, to);
        assert!(self.is_open(to), "unit {:?} cannot enter occupied cell {}", id, to);

        let from_idx = self.cell_index(from);
        let to_idx = self.cell_index(to);
        debug_assert_eq!(self.occupancy[from_idx], Some(id));
        self.occupancy[from_idx] = None;
        self.occupancy[to_idx] = Some(id);
        self.units.set_position(id, to);
        trace!(unit = id.0, %from, %to, "move");
    }

    /// Applies `attacker`'s attack power to `target`, removing the target
    /// from the board if its hit points drop to zero or below.
    pub fn strike(&mut self, attacker: UnitId, target: UnitId) -> Attack {
        let damage = self.units.get(attacker).attack_power;
        let victim = *self.units.get(target);
        assert!(victim.alive, "unit {:?} attacked after death", target);
        assert!(
            victim.faction != self.units.get(attacker).faction,
            "unit {:?} attacked an ally",
            attacker
        );

        let hp_after = self.units.wound(target, damage);
        let killed = hp_after <= 0;
        trace!(attacker = attacker.0, target = target.0, damage, hp_after, "attack");
        if killed {
            self.remove(target);
        }

        Attack {
            attacker,
            target,
            damage,
            hp_before: victim.hit_points,
            killed,
        }
    }

    /// Marks a unit dead and frees its cell.
    fn remove(&mut self, id: UnitId) {
        let unit = *self.units.get(id);
        let idx = self.cell_index(unit.position);
        debug_assert_eq!(self.occupancy[idx], Some(id));
        self.occupancy[idx] = None;
        self.units.mark_dead(id);
        debug!(unit = id.0, faction = unit.faction.name(), at = %unit.position, "unit died");
    }

    /// Returns true if both factions still have living units.
    pub fn is_contested(&self) -> bool {
        self.units.living_count(Faction::Elf) > 0 && self.units.living_count(Faction::Goblin) > 0
    }

    pub fn stats(&self) -> BoardStats {
        let summarize = |faction| FactionStats {
            units: self.units.living_count(faction),
            hit_points: self
                .units
                .of_faction(faction)
                .map(|u| i64::from(u.hit_points))
                .sum(),
        };
        BoardStats {
            elves: summarize(Faction::Elf),
            goblins: summarize(Faction::Goblin),
        }
    }

    /// Checks every occupancy invariant, panicking on the first violation.
    pub fn assert_consistent(&self) {
        let mut seen = vec![false; self.occupancy.len()];
        for unit in self.units.all().iter().filter(|u| u.alive) {
            assert!(unit.hit_points > 0, "unit {:?} alive with {} hp", unit.id, unit.hit_points);
            assert!(self.terrain.is_floor(unit.position), "unit {:?} inside a wall", unit.id);
            let idx = self.cell_index(unit.position);
            assert!(!seen[idx], "two living units share {}", unit.position);
            seen[idx] = true;
            assert_eq!(self.occupancy[idx], Some(unit.id), "occupancy out of sync at {}", unit.position);
        }
        let occupied = self.occupancy.iter().filter(|o| o.is_some()).count();
        assert_eq!(occupied, seen.iter().filter(|s| **s).count(), "stale occupancy entry");
    }

    fn cell_index(&self, pos: Position) -> usize {
        match self.terrain.index(pos) {
            Some(idx) => idx,
            None => panic!("position {} is off the grid", pos),
        }
    }
}
