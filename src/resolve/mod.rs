//! Turn and round resolution.
//!
//! A turn is one unit scanning for enemies, attacking or moving, and
//! attacking again after a move. A round gives every unit alive at its start
//! one turn, in reading order.

pub mod round;
pub mod turn;

pub use round::{play_round, RoundEnd, RoundReport};
pub use turn::{take_turn, TurnEvent, TurnOutcome};
