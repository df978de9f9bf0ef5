//! Combat driver.
//!
//! Runs rounds until a unit finds no enemies, then scores the battle as
//! completed rounds times the hit points left standing. An optional
//! protected faction turns the first death on that side into an abort,
//! which the power search relies on.

use serde::Serialize;
use tracing::debug;

use crate::board::{Board, Faction, UnitId};
use crate::resolve::{play_round, RoundEnd, RoundReport};

/// Errors that stop a combat from reaching a verdict.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CombatError {
    #[error("combat still running after {0} rounds")]
    RoundLimit(u32),

    #[error("stalemate after {0} rounds: no unit can move or attack")]
    Stalemate(u32),

    #[error("combat has already terminated")]
    Terminated,
}

/// Final score of a combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Rounds completed before the combat-over signal.
    pub rounds: u32,
    /// Hit points summed over every surviving unit.
    pub hit_points: i64,
    /// `rounds * hit_points`.
    pub score: i64,
    pub winner: Faction,
    pub survivors: usize,
}

/// How a combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Finished(Outcome),
    /// A unit of the protected faction died partway through round
    /// `rounds + 1`.
    Aborted { rounds: u32, casualty: UnitId },
}

impl Verdict {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Verdict::Finished(outcome) => Some(outcome),
            Verdict::Aborted { .. } => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Verdict::Aborted { .. })
    }
}

/// Whether a combat can still play rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatStatus {
    Running,
    Terminated(Verdict),
}

/// A combat in progress over an owned board.
#[derive(Debug, Clone)]
pub struct Combat {
    board: Board,
    rounds: u32,
    status: CombatStatus,
    protected: Option<Faction>,
    max_rounds: Option<u32>,
}

impl Combat {
    pub fn new(board: Board) -> Self {
        Combat {
            board,
            rounds: 0,
            status: CombatStatus::Running,
            protected: None,
            max_rounds: None,
        }
    }

    /// Aborts the combat as soon as a unit of `faction` dies.
    pub fn protecting(mut self, faction: Faction) -> Self {
        self.protected = Some(faction);
        self
    }

    /// Fails with `CombatError::RoundLimit` instead of playing past `limit`
    /// completed rounds.
    pub fn with_round_limit(mut self, limit: Option<u32>) -> Self {
        self.max_rounds = limit;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    /// Plays a single round and updates the status.
    pub fn step_round(&mut self) -> Result<RoundReport, CombatError> {
        if let CombatStatus::Terminated(_) = self.status {
            return Err(CombatError::Terminated);
        }
        if let Some(limit) = self.max_rounds {
            if self.rounds >= limit {
                return Err(CombatError::RoundLimit(limit));
            }
        }

        let report = play_round(&mut self.board, self.protected);
        debug_assert_board(&self.board);

        match report.end {
            RoundEnd::Completed => {
                self.rounds += 1;
                debug!(round = self.rounds, events = report.events.len(), "round complete");
                if report.is_idle() {
                    // Nothing moved and no hit points were lost: every
                    // later round would be identical.
                    return Err(CombatError::Stalemate(self.rounds));
                }
            }
            RoundEnd::CombatOver => {
                let outcome = self.outcome();
                debug!(rounds = outcome.rounds, score = outcome.score, "combat over");
                self.status = CombatStatus::Terminated(Verdict::Finished(outcome));
            }
            RoundEnd::Aborted { casualty } => {
                self.status = CombatStatus::Terminated(Verdict::Aborted {
                    rounds: self.rounds,
                    casualty,
                });
            }
        }
        Ok(report)
    }

    /// Plays rounds until the combat terminates.
    pub fn run(&mut self) -> Result<Verdict, CombatError> {
        self.run_with(|_, _| {})
    }

    /// Plays rounds until the combat terminates, calling `observe` after
    /// every round with the board and that round's report.
    pub fn run_with<F>(&mut self, mut observe: F) -> Result<Verdict, CombatError>
    where
        F: FnMut(&Board, &RoundReport),
    {
        loop {
            if let CombatStatus::Terminated(verdict) = self.status {
                return Ok(verdict);
            }
            let report = self.step_round()?;
            observe(&self.board, &report);
        }
    }

    /// Scores the board as it stands.
    pub fn outcome(&self) -> Outcome {
        let hit_points = self.board.units().total_hit_points();
        let stats = self.board.stats();
        let winner = if stats.goblins.units > 0 && stats.elves.units == 0 {
            Faction::Goblin
        } else {
            Faction::Elf
        };
        Outcome {
            rounds: self.rounds,
            hit_points,
            score: i64::from(self.rounds) * hit_points,
            winner,
            survivors: stats.elves.units + stats.goblins.units,
        }
    }
}

#[cfg(debug_assertions)]
fn debug_assert_board(board: &Board) {
    board.assert_consistent();
}

#[cfg(not(debug_assertions))]
fn debug_assert_board(_board: &Board) {}
