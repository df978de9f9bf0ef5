//! Grid loading.
//!
//! Parses a rectangular character grid into terrain and unit placements.
//! Blank lines are ignored and trailing whitespace (including `\r`) is
//! trimmed from every row; everything else must be one of `#`, `.`, `E`, `G`.

use std::str::FromStr;

use crate::board::{Armament, Board, Cell, Faction, Placement, Position, SetupError, Terrain};

/// Errors that can occur while parsing a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown character '{ch}' at row {row}, column {col}")]
    UnknownChar { ch: char, row: usize, col: usize },
}

/// A parsed grid: static terrain plus where each unit starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub terrain: Terrain,
    pub placements: Vec<Placement>,
}

impl Scenario {
    /// Number of units of `faction` in the starting deployment.
    pub fn count(&self, faction: Faction) -> usize {
        self.placements.iter().filter(|p| p.faction == faction).count()
    }

    /// Builds a fresh board with every unit equipped from `armament`.
    pub fn deploy(&self, armament: &Armament) -> Result<Board, SetupError> {
        Board::deploy(self.terrain.clone(), &self.placements, armament)
    }
}

impl FromStr for Scenario {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grid(s)
    }
}

/// Parses grid text into a `Scenario`.
pub fn parse_grid(text: &str) -> Result<Scenario, GridError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    let width = match rows.first() {
        Some(first) => first.chars().count(),
        None => return Err(GridError::Empty),
    };

    let mut cells = Vec::with_capacity(width * rows.len());
    let mut placements = Vec::new();

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        for (col, ch) in line.chars().enumerate() {
            let cell = match ch {
                '#' => Cell::Wall,
                '.' => Cell::Open,
                _ => match Faction::from_grid_char(ch) {
                    Some(faction) => {
                        placements.push(Placement {
                            faction,
                            position: Position::new(row, col),
                        });
                        Cell::Open
                    }
                    None => return Err(GridError::UnknownChar { ch, row, col }),
                },
            };
            cells.push(cell);
        }
    }

    let terrain = Terrain::from_cells(width, rows.len(), cells).ok_or(GridError::Empty)?;
    Ok(Scenario {
        terrain,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units_and_walls() {
        let s = parse_grid("#####\n#E.G#\n#####\n").unwrap();
        assert_eq!(s.terrain.width(), 5);
        assert_eq!(s.terrain.height(), 3);
        assert_eq!(s.terrain.cell(Position::new(1, 1)), Cell::Open);
        assert_eq!(s.terrain.cell(Position::new(1, 4)), Cell::Wall);
        assert_eq!(
            s.placements,
            vec![
                Placement { faction: Faction::Elf, position: Position::new(1, 1) },
                Placement { faction: Faction::Goblin, position: Position::new(1, 3) },
            ]
        );
        assert_eq!(s.count(Faction::Elf), 1);
        assert_eq!(s.count(Faction::Goblin), 1);
    }

    #[test]
    fn tolerates_crlf_and_blank_lines() {
        let s: Scenario = "\r\n###\r\n#E#\r\n\r\n###\r\n\r\n".parse().unwrap();
        assert_eq!(s.terrain.height(), 3);
        assert_eq!(s.placements.len(), 1);
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_grid("####\n#E.\n####"),
            Err(GridError::Ragged { row: 1, expected: 4, found: 3 })
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            parse_grid("####\n#EX#\n####"),
            Err(GridError::UnknownChar { ch: 'X', row: 1, col: 2 })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_grid(""), Err(GridError::Empty));
        assert_eq!(parse_grid("\n\n"), Err(GridError::Empty));
    }

    #[test]
    fn deploy_assigns_armament() {
        let s = parse_grid("#####\n#E.G#\n#####").unwrap();
        let board = s.deploy(&Armament::default().with_attack(Faction::Elf, 10)).unwrap();
        let elf = board.unit_at(Position::new(1, 1)).unwrap();
        let goblin = board.unit_at(Position::new(1, 3)).unwrap();
        assert_eq!(elf.attack_power, 10);
        assert_eq!(goblin.attack_power, 3);
    }

    #[test]
    fn deploy_without_units_fails() {
        let s = parse_grid("###\n#.#\n###").unwrap();
        assert_eq!(s.deploy(&Armament::default()), Err(SetupError::NoUnits));
    }
}
