//! Board rendering.
//!
//! Produces the grid with units drawn in place. `render_board` appends each
//! row's units and hit points in reading order, e.g.
//! `#...EG#   E(200), G(197)`.

use std::fmt::Write;

use crate::board::{Board, Position};

/// Renders the bare grid, one line per row.
pub fn render_map(board: &Board) -> String {
    render(board, false)
}

/// Renders the grid with per-row hit-point annotations.
pub fn render_board(board: &Board) -> String {
    render(board, true)
}

fn render(board: &Board, annotate: bool) -> String {
    let terrain = board.terrain();
    let mut out = String::with_capacity((terrain.width() + 1) * terrain.height());

    for row in 0..terrain.height() {
        let mut notes = Vec::new();
        for col in 0..terrain.width() {
            let pos = Position::new(row, col);
            match board.unit_at(pos) {
                Some(unit) => {
                    out.push(unit.faction.grid_char());
                    notes.push(format!("{}({})", unit.faction.grid_char(), unit.hit_points));
                }
                None => out.push(terrain.cell(pos).grid_char()),
            }
        }
        if annotate && !notes.is_empty() {
            // Writing to a String cannot fail.
            let _ = write!(out, "   {}", notes.join(", "));
        }
        out.push('\n');
    }
    out
}
