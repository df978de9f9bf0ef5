//! Simulation configuration.
//!
//! Every field has a default, so a JSON file only needs to name what it
//! overrides:
//!
//! ```json
//! { "elf_attack": 10, "search_threads": 4 }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::board::{Armament, Faction, DEFAULT_ATTACK_POWER, DEFAULT_HIT_POINTS};
use crate::protocol::grid::Scenario;
use crate::search::PowerSearch;

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Knobs for a combat run and the power search that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Hit points every unit starts with.
    pub hit_points: i32,
    /// Elf attack power for the plain combat.
    pub elf_attack: i32,
    /// Goblin attack power for the plain combat.
    pub goblin_attack: i32,
    /// Faction whose attack power the search tunes.
    pub protected: Faction,
    /// First attack power the search tries; defaults to one above the
    /// protected faction's attack power.
    pub search_start: Option<i32>,
    /// Highest attack power the search tries; defaults to `hit_points`.
    pub search_max: Option<i32>,
    /// Worker threads for the search; 1 runs it sequentially.
    pub search_threads: usize,
    /// Abort a combat that is still running after this many rounds.
    pub max_rounds: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            hit_points: DEFAULT_HIT_POINTS,
            elf_attack: DEFAULT_ATTACK_POWER,
            goblin_attack: DEFAULT_ATTACK_POWER,
            protected: Faction::Elf,
            search_start: None,
            search_max: None,
            search_threads: 1,
            max_rounds: None,
        }
    }
}

impl SimConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Rejects values no combat can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hit_points <= 0 {
            return Err(ConfigError::Invalid(format!(
                "hit_points must be positive, got {}",
                self.hit_points
            )));
        }
        if self.elf_attack < 0 || self.goblin_attack < 0 {
            return Err(ConfigError::Invalid("attack power cannot be negative".into()));
        }
        if self.search_start.is_some_and(|start| start < 0) {
            return Err(ConfigError::Invalid("search_start cannot be negative".into()));
        }
        if self.search_threads == 0 {
            return Err(ConfigError::Invalid("search_threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Starting stats for the plain combat.
    pub fn armament(&self) -> Armament {
        Armament {
            hit_points: self.hit_points,
            elf_attack: self.elf_attack,
            goblin_attack: self.goblin_attack,
        }
    }

    /// Builds the power search for `scenario`, applying only the bounds
    /// this config sets explicitly.
    pub fn power_search<'a>(&self, scenario: &'a Scenario) -> PowerSearch<'a> {
        let mut search = PowerSearch::new(scenario, self.armament(), self.protected)
            .with_round_limit(self.max_rounds);
        if let Some(start) = self.search_start {
            search = search.starting_at(start);
        }
        match (self.search_max, self.search_start) {
            (Some(max), _) => search.up_to(max),
            // A start above the hit points still gets one trial.
            (None, Some(start)) => search.up_to(self.hit_points.max(start)),
            (None, None) => search,
        }
    }
}
