//! Random cave generation.
//!
//! Produces walled caves with scattered interior walls and units, for
//! property tests and benchmarks. Output is fully determined by the RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Cell, Faction, Placement, Position, Terrain};
use crate::protocol::grid::Scenario;

/// Shape of a generated cave.
#[derive(Debug, Clone, Copy)]
pub struct CaveSpec {
    pub width: usize,
    pub height: usize,
    /// Probability that an interior cell is a wall.
    pub wall_density: f64,
    pub elves: usize,
    pub goblins: usize,
}

impl Default for CaveSpec {
    fn default() -> Self {
        CaveSpec {
            width: 16,
            height: 16,
            wall_density: 0.15,
            elves: 4,
            goblins: 6,
        }
    }
}

/// Generates a cave. If there is less open floor than requested units,
/// the later placements are dropped.
pub fn random_cave(spec: &CaveSpec, rng: &mut impl Rng) -> Scenario {
    let mut terrain = Terrain::walled(spec.width.max(3), spec.height.max(3));
    let mut open = Vec::new();

    for row in 1..terrain.height() - 1 {
        for col in 1..terrain.width() - 1 {
            let pos = Position::new(row, col);
            if rng.gen_bool(spec.wall_density.clamp(0.0, 1.0)) {
                terrain.set(pos, Cell::Wall);
            } else {
                open.push(pos);
            }
        }
    }

    open.shuffle(rng);
    let factions = std::iter::repeat(Faction::Elf)
        .take(spec.elves)
        .chain(std::iter::repeat(Faction::Goblin).take(spec.goblins));
    let placements = factions
        .zip(open)
        .map(|(faction, position)| Placement { faction, position })
        .collect();

    Scenario {
        terrain,
        placements,
    }
}
