//! Target selection and movement.
//!
//! Works out which enemy a unit should strike, which cells put it in range
//! of an enemy, and which single step brings it closest to one of them.

pub mod path;
pub mod target;

pub use path::{nearest_goal, next_step, DistanceMap, Step};
pub use target::{attack_target, goal_cells, in_range_of_enemy};
