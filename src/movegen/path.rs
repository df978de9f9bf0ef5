//! Shortest-path step selection.
//!
//! A unit that is not in range of an enemy picks the goal cell it can reach
//! in the fewest steps (ties to reading order), then takes the single step
//! that keeps it on a shortest path to that cell (ties again to reading
//! order). Both choices are made by strict minimum over `(distance,
//! position)`, never by whichever cell the search happened to visit first.
//!
//! Searches only cross open, unoccupied floor. The mover's own cell is the
//! search origin even though it is occupied.

use std::collections::{BTreeSet, VecDeque};

use crate::board::{Board, Position};

/// Result of asking where a unit should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The unit already stands on a goal cell.
    Arrived,
    /// Move one cell to the given neighbour.
    Toward(Position),
    /// No goal cell can be reached from here.
    Unreachable,
}

/// Breadth-first distances from one source over open cells.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    width: usize,
    height: usize,
    dist: Vec<Option<u32>>,
}

impl DistanceMap {
    /// Floods outward from `source` until every reachable open cell has a
    /// distance.
    pub fn flood(board: &Board, source: Position) -> Self {
        let terrain = board.terrain();
        let mut map = DistanceMap {
            width: terrain.width(),
            height: terrain.height(),
            dist: vec![None; terrain.width() * terrain.height()],
        };
        let Some(start) = terrain.index(source) else {
            return map;
        };
        map.dist[start] = Some(0);

        let mut queue = VecDeque::from([(source, 0u32)]);
        while let Some((pos, d)) = queue.pop_front() {
            for next in board.open_neighbors(pos) {
                if let Some(idx) = terrain.index(next) {
                    if map.dist[idx].is_none() {
                        map.dist[idx] = Some(d + 1);
                        queue.push_back((next, d + 1));
                    }
                }
            }
        }
        map
    }

    /// Distance from the source to `pos`, or `None` if unreachable.
    pub fn get(&self, pos: Position) -> Option<u32> {
        if pos.row < self.height && pos.col < self.width {
            self.dist[pos.row * self.width + pos.col]
        } else {
            None
        }
    }
}

/// Finds the goal nearest to `from`, breaking distance ties by reading order.
///
/// The search stops once the frontier moves past the first layer that
/// contains a goal, but every cell in that layer is still examined.
pub fn nearest_goal(board: &Board, from: Position, goals: &BTreeSet<Position>) -> Option<(Position, u32)> {
    let terrain = board.terrain();
    let mut visited = vec![false; terrain.width() * terrain.height()];
    if let Some(idx) = terrain.index(from) {
        visited[idx] = true;
    }

    let mut best: Option<(u32, Position)> = None;
    let mut queue = VecDeque::from([(from, 0u32)]);
    while let Some((pos, d)) = queue.pop_front() {
        if matches!(best, Some((limit, _)) if d > limit) {
            break;
        }
        if goals.contains(&pos) {
            best = Some(match best {
                Some(current) => current.min((d, pos)),
                None => (d, pos),
            });
            continue;
        }
        for next in board.open_neighbors(pos) {
            if let Some(idx) = terrain.index(next) {
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((next, d + 1));
                }
            }
        }
    }

    best.map(|(d, pos)| (pos, d))
}

/// Decides the next single step for a unit at `from` heading for `goals`.
pub fn next_step(board: &Board, from: Position, goals: &BTreeSet<Position>) -> Step {
    if goals.contains(&from) {
        return Step::Arrived;
    }
    let Some((target, _)) = nearest_goal(board, from, goals) else {
        return Step::Unreachable;
    };

    // Distances are symmetric on the grid, so one flood from the chosen
    // cell scores every first step at once.
    let from_target = DistanceMap::flood(board, target);
    board
        .open_neighbors(from)
        .filter_map(|n| from_target.get(n).map(|d| (d, n)))
        .min()
        .map_or(Step::Unreachable, |(_, n)| Step::Toward(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Armament, UnitId};
    use crate::movegen::target::goal_cells;
    use crate::protocol::grid::parse_grid;

    fn board(grid: &str) -> Board {
        parse_grid(grid).unwrap().deploy(&Armament::default()).unwrap()
    }

    fn id_at(board: &Board, row: usize, col: usize) -> UnitId {
        board.unit_at(Position::new(row, col)).unwrap().id
    }

    #[test]
    fn nearest_goal_prefers_reading_order() {
        let b = board("#######\n#E..G.#\n#...#.#\n#.G.#G#\n#######");
        let elf = id_at(&b, 1, 1);
        let goals = goal_cells(&b, elf);
        assert_eq!(
            nearest_goal(&b, Position::new(1, 1), &goals),
            Some((Position::new(1, 3), 2))
        );
        assert_eq!(next_step(&b, Position::new(1, 1), &goals), Step::Toward(Position::new(1, 2)));
    }

    #[test]
    fn first_step_ties_break_by_reading_order() {
        let b = board("#######\n#.E...#\n#.....#\n#...G.#\n#######");
        let elf = id_at(&b, 1, 2);
        let goals = goal_cells(&b, elf);
        // Goals at distance 3 are (2,4) and (3,3); (2,4) wins. Both
        // right and down lead there in one fewer step; right wins.
        assert_eq!(
            nearest_goal(&b, Position::new(1, 2), &goals),
            Some((Position::new(2, 4), 3))
        );
        assert_eq!(next_step(&b, Position::new(1, 2), &goals), Step::Toward(Position::new(1, 3)));
    }

    #[test]
    fn prefers_up_over_left_when_both_shortest() {
        // Goal at (1,1) reachable via (1,2) [up] or (2,1) [left] in two steps.
        let b = board("#####\n#...#\n#.E.#\n#####");
        let goals = BTreeSet::from([Position::new(1, 1)]);
        assert_eq!(next_step(&b, Position::new(2, 2), &goals), Step::Toward(Position::new(1, 2)));
    }

    #[test]
    fn walled_in_unit_cannot_move() {
        let b = board("#######\n#E#.G.#\n###...#\n#######");
        let elf = id_at(&b, 1, 1);
        let goals = goal_cells(&b, elf);
        assert!(!goals.is_empty());
        assert_eq!(next_step(&b, Position::new(1, 1), &goals), Step::Unreachable);
    }

    #[test]
    fn boxed_in_by_units_cannot_move() {
        let b = board("#####\n#GEG#\n##E##\n#...#\n#####");
        let top = id_at(&b, 1, 2);
        // The top elf's only floor neighbour is another elf.
        assert_eq!(b.open_neighbors(Position::new(1, 2)).count(), 0);
        let goals = BTreeSet::from([Position::new(3, 1)]);
        assert_eq!(next_step(&b, b.unit(top).position, &goals), Step::Unreachable);
    }

    #[test]
    fn arrived_when_standing_on_goal() {
        let b = board("#####\n#E.G#\n#####");
        let goals = BTreeSet::from([Position::new(1, 1)]);
        assert_eq!(next_step(&b, Position::new(1, 1), &goals), Step::Arrived);
    }

    #[test]
    fn distance_map_skips_occupied_cells() {
        let b = board("#####\n#.G.#\n#...#\n#####");
        let map = DistanceMap::flood(&b, Position::new(1, 1));
        assert_eq!(map.get(Position::new(1, 1)), Some(0));
        assert_eq!(map.get(Position::new(1, 2)), None);
        assert_eq!(map.get(Position::new(1, 3)), Some(4));
        assert_eq!(map.get(Position::new(0, 0)), None);
    }

    #[test]
    fn repeated_queries_agree() {
        let b = board("#########\n#G..G..G#\n#.......#\n#.......#\n#G..E..G#\n#.......#\n#.......#\n#G..G..G#\n#########");
        let elf = id_at(&b, 4, 4);
        let goals = goal_cells(&b, elf);
        let first = next_step(&b, Position::new(4, 4), &goals);
        for _ in 0..5 {
            assert_eq!(next_step(&b, Position::new(4, 4), &goals), first);
        }
        assert_eq!(first, Step::Toward(Position::new(3, 4)));
    }
}
