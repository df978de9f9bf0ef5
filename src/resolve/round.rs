//! Full-round resolution.
//!
//! The turn order is a reading-order snapshot of the living units taken when
//! the round starts. Units that die mid-round are skipped when their slot
//! comes up; units that move do not change their slot.

use tracing::debug;

use crate::board::{Board, Faction, UnitId};

use super::turn::{take_turn, TurnEvent, TurnOutcome};

/// How a round finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Every unit in the snapshot had its turn (or was dead by then).
    Completed,
    /// A unit found no enemies; the round does not count.
    CombatOver,
    /// A unit of the protected faction died.
    Aborted { casualty: UnitId },
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub events: Vec<TurnEvent>,
    pub end: RoundEnd,
}

impl RoundReport {
    /// Total hit points removed from living units this round.
    pub fn hp_lost(&self) -> i64 {
        self.events
            .iter()
            .map(|e| match e {
                TurnEvent::Attacked(attack) => attack.hp_lost(),
                TurnEvent::Moved { .. } => 0,
            })
            .sum()
    }

    /// True if the round left the board exactly as it found it: nobody
    /// moved and no attack drew blood.
    pub fn is_idle(&self) -> bool {
        self.hp_lost() == 0
            && !self
                .events
                .iter()
                .any(|e| matches!(e, TurnEvent::Moved { .. }))
    }

    /// Ids of units killed this round, in the order they died.
    pub fn casualties(&self) -> Vec<UnitId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::Attacked(attack) if attack.killed => Some(attack.target),
                _ => None,
            })
            .collect()
    }
}

/// Plays one round. When `protected` is set, the round stops at the first
/// death of a unit of that faction.
pub fn play_round(board: &mut Board, protected: Option<Faction>) -> RoundReport {
    let order = board.units().turn_order();
    let mut events = Vec::new();

    for id in order {
        if !board.unit(id).alive {
            continue;
        }

        let outcome = take_turn(board, id);
        let casualty = outcome
            .kill()
            .map(|attack| attack.target)
            .filter(|target| Some(board.unit(*target).faction) == protected);

        match outcome {
            TurnOutcome::NoTargets => {
                debug!(unit = id.0, "no targets left");
                return RoundReport {
                    events,
                    end: RoundEnd::CombatOver,
                };
            }
            TurnOutcome::Acted(turn_events) => events.extend(turn_events),
        }

        if let Some(casualty) = casualty {
            debug!(unit = casualty.0, "protected unit lost");
            return RoundReport {
                events,
                end: RoundEnd::Aborted { casualty },
            };
        }
    }

    RoundReport {
        events,
        end: RoundEnd::Completed,
    }
}
