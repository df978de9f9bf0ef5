//! Single-unit turn.
//!
//! Turn phases, each with an early exit:
//! - Scan: no living enemies at all ends the combat.
//! - Engage: an adjacent enemy is attacked and the turn ends.
//! - Advance: step toward the nearest reachable goal cell, if any.
//! - Strike: after a step, attack if an enemy is now adjacent.

use serde::Serialize;
use tracing::trace;

use crate::board::{Attack, Board, Position, UnitId};
use crate::movegen::{attack_target, goal_cells, next_step, Step};

/// Something that happened during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnEvent {
    Moved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    Attacked(Attack),
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The unit found no living enemies; combat is over.
    NoTargets,
    /// The unit took its turn. Events are empty if it could neither move
    /// nor attack.
    Acted(Vec<TurnEvent>),
}

impl TurnOutcome {
    /// The attack that killed a unit during this turn, if any.
    pub fn kill(&self) -> Option<&Attack> {
        match self {
            TurnOutcome::NoTargets => None,
            TurnOutcome::Acted(events) => events.iter().find_map(|e| match e {
                TurnEvent::Attacked(attack) if attack.killed => Some(attack),
                _ => None,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Engage,
    Advance,
    Strike,
    Done,
}

/// Runs one turn for a living unit.
pub fn take_turn(board: &mut Board, unit: UnitId) -> TurnOutcome {
    debug_assert!(board.unit(unit).alive, "dead unit {:?} given a turn", unit);

    let mut events = Vec::new();
    let mut phase = Phase::Scan;

    while phase != Phase::Done {
        phase = match phase {
            Phase::Scan => {
                if !board.units().has_enemies(board.unit(unit).faction) {
                    return TurnOutcome::NoTargets;
                }
                Phase::Engage
            }
            Phase::Engage => match attack_target(board, unit) {
                Some(target) => {
                    events.push(TurnEvent::Attacked(board.strike(unit, target)));
                    Phase::Done
                }
                None => Phase::Advance,
            },
            Phase::Advance => {
                let goals = goal_cells(board, unit);
                let from = board.unit(unit).position;
                if goals.is_empty() {
                    trace!(unit = unit.0, "no open cell next to any enemy");
                    Phase::Done
                } else {
                    match next_step(board, from, &goals) {
                        Step::Toward(to) => {
                            board.move_unit(unit, to);
                            events.push(TurnEvent::Moved { unit, from, to });
                            Phase::Strike
                        }
                        Step::Arrived => Phase::Strike,
                        Step::Unreachable => Phase::Done,
                    }
                }
            }
            Phase::Strike => {
                if let Some(target) = attack_target(board, unit) {
                    events.push(TurnEvent::Attacked(board.strike(unit, target)));
                }
                Phase::Done
            }
            Phase::Done => Phase::Done,
        };
    }

    TurnOutcome::Acted(events)
}
