//! Text formats.
//!
//! The grid format is the only bit-exact contract: `#` wall, `.` open
//! floor, `E` an elf, `G` a goblin. The renderer produces the same grid
//! annotated with per-row hit points.

pub mod grid;
pub mod render;

pub use grid::{parse_grid, GridError, Scenario};
pub use render::{render_board, render_map};
