//! Minimal attack-power search.
//!
//! Every trial deploys a fresh board from the scenario, so trials share no
//! mutable state and can run concurrently. The search does not assume that
//! success is monotonic in attack power: both the linear scan and the
//! windowed parallel scan return the smallest power at or above `start`
//! that yields a flawless win.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Armament, Faction, SetupError};
use crate::combat::{Combat, CombatError, Outcome, Verdict};
use crate::protocol::grid::Scenario;

/// Errors that stop a power search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("scenario has no {0} units to protect")]
    NothingToProtect(&'static str),

    #[error("no attack power in {start}..={max} avoids losses")]
    Exhausted { start: i32, max: i32 },

    #[error("invalid scenario: {0}")]
    Setup(#[from] SetupError),

    #[error("trial at attack power {power} failed: {source}")]
    Trial {
        power: i32,
        #[source]
        source: CombatError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// The smallest winning attack power and the combat it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub attack_power: i32,
    pub outcome: Outcome,
    /// Number of powers tried, counting from `start`.
    pub attempts: u32,
}

/// Searches attack powers for one faction.
#[derive(Debug, Clone)]
pub struct PowerSearch<'a> {
    scenario: &'a Scenario,
    armament: Armament,
    protected: Faction,
    start: i32,
    max_power: i32,
    max_rounds: Option<u32>,
}

impl<'a> PowerSearch<'a> {
    /// Creates a search starting one above the faction's current power and
    /// capped at the starting hit points, where every blow is a kill.
    pub fn new(scenario: &'a Scenario, armament: Armament, protected: Faction) -> Self {
        PowerSearch {
            scenario,
            armament,
            protected,
            start: armament.attack(protected).saturating_add(1),
            max_power: armament
                .hit_points
                .max(armament.attack(protected).saturating_add(1)),
            max_rounds: None,
        }
    }

    /// Sets the first attack power to try.
    pub fn starting_at(mut self, start: i32) -> Self {
        self.start = start.max(0);
        self
    }

    /// Sets the last attack power to try.
    pub fn up_to(mut self, max_power: i32) -> Self {
        self.max_power = max_power;
        self
    }

    pub fn with_round_limit(mut self, limit: Option<u32>) -> Self {
        self.max_rounds = limit;
        self
    }

    /// Runs a single combat with the protected faction at `power`.
    pub fn trial(&self, power: i32) -> Result<Verdict, SearchError> {
        let armament = self.armament.with_attack(self.protected, power);
        let board = self.scenario.deploy(&armament)?;
        let started = Instant::now();
        let verdict = Combat::new(board)
            .protecting(self.protected)
            .with_round_limit(self.max_rounds)
            .run()
            .map_err(|source| SearchError::Trial { power, source })?;
        debug!(
            power,
            aborted = verdict.is_aborted(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trial finished"
        );
        Ok(verdict)
    }

    /// Tries powers one at a time from `start` upward.
    pub fn run(&self) -> Result<SearchResult, SearchError> {
        self.check_protected()?;
        for power in self.start..=self.max_power {
            if let Verdict::Finished(outcome) = self.trial(power)? {
                return Ok(self.found(power, outcome));
            }
        }
        Err(self.exhausted())
    }

    /// Tries windows of `threads` consecutive powers concurrently. Within a
    /// window the lowest winning power is taken, so the answer matches `run`.
    pub fn run_parallel(&self, threads: usize) -> Result<SearchResult, SearchError> {
        if threads <= 1 {
            return self.run();
        }
        self.check_protected()?;

        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        let window = i32::try_from(threads).unwrap_or(i32::MAX);
        let mut low = self.start;

        while low <= self.max_power {
            let high = low.saturating_add(window - 1).min(self.max_power);
            let verdicts: Vec<(i32, Result<Verdict, SearchError>)> = pool.install(|| {
                (low..=high)
                    .into_par_iter()
                    .map(|power| (power, self.trial(power)))
                    .collect()
            });

            for (power, verdict) in verdicts {
                if let Verdict::Finished(outcome) = verdict? {
                    return Ok(self.found(power, outcome));
                }
            }
            info!(from = low, to = high, "window exhausted");
            if high == self.max_power {
                break;
            }
            low = high + 1;
        }
        Err(self.exhausted())
    }

    fn check_protected(&self) -> Result<(), SearchError> {
        if self.scenario.count(self.protected) == 0 {
            return Err(SearchError::NothingToProtect(self.protected.name()));
        }
        Ok(())
    }

    fn found(&self, power: i32, outcome: Outcome) -> SearchResult {
        info!(power, score = outcome.score, "flawless win found");
        SearchResult {
            attack_power: power,
            outcome,
            attempts: u32::try_from(i64::from(power) - i64::from(self.start) + 1)
                .unwrap_or(u32::MAX),
        }
    }

    fn exhausted(&self) -> SearchError {
        SearchError::Exhausted {
            start: self.start,
            max: self.max_power,
        }
    }
}
