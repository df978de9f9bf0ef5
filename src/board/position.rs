//! Grid coordinates and reading order.
//!
//! A `Position` is a `(row, col)` pair. The derived ordering compares the
//! row first and the column second, which is exactly reading order: top to
//! bottom, then left to right. Every tie-break in the simulator relies on it.

use serde::Serialize;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns the orthogonal neighbours in canonical order: up, left,
    /// right, down. Cells that would fall off the top or left edge are
    /// skipped; the bottom and right edges are the terrain's concern.
    pub fn neighbors4(self) -> impl Iterator<Item = Position> {
        let up = self.row.checked_sub(1).map(|row| Position::new(row, self.col));
        let left = self.col.checked_sub(1).map(|col| Position::new(self.row, col));
        let right = Some(Position::new(self.row, self.col + 1));
        let down = Some(Position::new(self.row + 1, self.col));
        [up, left, right, down].into_iter().flatten()
    }

    /// Returns true if `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_reading_order() {
        let mut cells = vec![
            Position::new(2, 0),
            Position::new(1, 5),
            Position::new(1, 2),
            Position::new(0, 9),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 9),
                Position::new(1, 2),
                Position::new(1, 5),
                Position::new(2, 0),
            ]
        );
    }

    #[test]
    fn neighbors_follow_canonical_order() {
        let n: Vec<_> = Position::new(3, 3).neighbors4().collect();
        assert_eq!(
            n,
            vec![
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(3, 4),
                Position::new(4, 3),
            ]
        );
        // Canonical order is also ascending reading order.
        let mut sorted = n.clone();
        sorted.sort();
        assert_eq!(n, sorted);
    }

    #[test]
    fn neighbors_skip_negative_edges() {
        let n: Vec<_> = Position::new(0, 0).neighbors4().collect();
        assert_eq!(n, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn adjacency() {
        let p = Position::new(4, 4);
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(p.is_adjacent(Position::new(4, 5)));
        assert!(!p.is_adjacent(Position::new(5, 5)));
        assert!(!p.is_adjacent(p));
    }
}
