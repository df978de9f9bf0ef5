//! Static terrain.
//!
//! Walls and open floor never change once a cave is loaded; occupancy is
//! tracked separately by `Board`.

use super::position::Position;

/// One terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    /// Returns the grid character for this cell.
    pub const fn grid_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
        }
    }
}

/// A rectangular wall/floor grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Terrain {
    /// Builds terrain from row-major cells. Returns `None` if the cell count
    /// does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if width.checked_mul(height)? != cells.len() {
            return None;
        }
        Some(Terrain { width, height, cells })
    }

    /// Creates a terrain of open floor enclosed by a single ring of wall.
    pub fn walled(width: usize, height: usize) -> Self {
        let mut cells = vec![Cell::Open; width * height];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || col == 0 || row + 1 == height || col + 1 == width {
                    cells[row * width + col] = Cell::Wall;
                }
            }
        }
        Terrain { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major index of `pos`, or `None` if out of bounds.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < self.height && pos.col < self.width {
            Some(pos.row * self.width + pos.col)
        } else {
            None
        }
    }

    /// Returns the cell at `pos`; anything off the grid reads as wall.
    pub fn cell(&self, pos: Position) -> Cell {
        self.index(pos).map_or(Cell::Wall, |i| self.cells[i])
    }

    /// Returns true if `pos` is on the grid and not a wall.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.cell(pos) == Cell::Open
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walled_terrain_has_open_interior() {
        let t = Terrain::walled(4, 3);
        assert_eq!(t.cell(Position::new(0, 0)), Cell::Wall);
        assert_eq!(t.cell(Position::new(1, 1)), Cell::Open);
        assert_eq!(t.cell(Position::new(1, 2)), Cell::Open);
        assert_eq!(t.cell(Position::new(1, 3)), Cell::Wall);
        assert_eq!(t.cell(Position::new(2, 1)), Cell::Wall);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let t = Terrain::walled(3, 3);
        assert!(!t.is_floor(Position::new(7, 1)));
        assert!(t.index(Position::new(3, 0)).is_none());
    }

    #[test]
    fn from_cells_checks_dimensions() {
        assert!(Terrain::from_cells(2, 2, vec![Cell::Open; 3]).is_none());
        assert!(Terrain::from_cells(2, 2, vec![Cell::Open; 4]).is_some());
    }
}
