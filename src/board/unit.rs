//! Factions and combatants.
//!
//! Represents the two warring factions, individual units with their hit
//! points and attack power, and the per-faction armament used to deploy them.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Hit points every unit starts with unless configured otherwise.
pub const DEFAULT_HIT_POINTS: i32 = 200;

/// Attack power every unit has unless configured otherwise.
pub const DEFAULT_ATTACK_POWER: i32 = 3;

/// One of the two sides in a combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Elf,
    Goblin,
}

impl Faction {
    /// Returns the grid character that marks a unit of this faction.
    pub const fn grid_char(self) -> char {
        match self {
            Faction::Elf => 'E',
            Faction::Goblin => 'G',
        }
    }

    /// Parses a faction from its grid character.
    pub fn from_grid_char(c: char) -> Option<Faction> {
        match c {
            'E' => Some(Faction::Elf),
            'G' => Some(Faction::Goblin),
            _ => None,
        }
    }

    /// Returns the opposing faction.
    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Elf => Faction::Goblin,
            Faction::Goblin => Faction::Elf,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Faction::Elf => "elf",
            Faction::Goblin => "goblin",
        }
    }
}

impl std::str::FromStr for Faction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elf" | "elves" | "e" => Ok(Faction::Elf),
            "goblin" | "goblins" | "g" => Ok(Faction::Goblin),
            other => Err(format!("unknown faction '{}'", other)),
        }
    }
}

/// Stable handle to a unit: its index in the unit set. Ids are assigned in
/// reading order of the initial deployment and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub usize);

/// A combatant on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub faction: Faction,
    pub position: Position,
    pub hit_points: i32,
    pub attack_power: i32,
    pub alive: bool,
}

impl Unit {
    pub fn new(faction: Faction, position: Position, hit_points: i32, attack_power: i32) -> Self {
        Unit {
            id: UnitId(0),
            faction,
            position,
            hit_points,
            attack_power,
            alive: true,
        }
    }

    /// Returns true if the unit is alive and belongs to the opposing faction.
    pub fn is_enemy_of(&self, faction: Faction) -> bool {
        self.alive && self.faction != faction
    }
}

/// Where a unit of a given faction starts, before stats are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub faction: Faction,
    pub position: Position,
}

/// Starting hit points and per-faction attack power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armament {
    pub hit_points: i32,
    pub elf_attack: i32,
    pub goblin_attack: i32,
}

impl Default for Armament {
    fn default() -> Self {
        Armament {
            hit_points: DEFAULT_HIT_POINTS,
            elf_attack: DEFAULT_ATTACK_POWER,
            goblin_attack: DEFAULT_ATTACK_POWER,
        }
    }
}

impl Armament {
    pub fn attack(&self, faction: Faction) -> i32 {
        match faction {
            Faction::Elf => self.elf_attack,
            Faction::Goblin => self.goblin_attack,
        }
    }

    /// Returns a copy with `faction`'s attack power replaced.
    pub fn with_attack(mut self, faction: Faction, power: i32) -> Self {
        match faction {
            Faction::Elf => self.elf_attack = power,
            Faction::Goblin => self.goblin_attack = power,
        }
        self
    }

    /// Builds a fresh unit for `placement`.
    pub fn equip(&self, placement: Placement) -> Unit {
        Unit::new(
            placement.faction,
            placement.position,
            self.hit_points,
            self.attack(placement.faction),
        )
    }
}
