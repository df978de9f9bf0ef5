//! Board representation.
//!
//! Contains the grid coordinates, static terrain, factions and units, and
//! the mutable board that ties them together.

pub mod position;
pub mod state;
pub mod terrain;
pub mod unit;
pub mod units;

pub use position::Position;
pub use state::{Attack, Board, BoardStats, FactionStats, SetupError};
pub use terrain::{Cell, Terrain};
pub use unit::{
    Armament, Faction, Placement, Unit, UnitId, DEFAULT_ATTACK_POWER, DEFAULT_HIT_POINTS,
};
pub use units::UnitSet;
