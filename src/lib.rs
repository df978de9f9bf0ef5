//! Skirmish: a deterministic turn-based grid combat simulator.
//!
//! Exposes the board representation, movement and targeting rules, turn
//! and round resolution, the combat driver, and the attack-power search for
//! use by integration tests, benchmarks, and the binary entry point.

pub mod board;
pub mod combat;
pub mod config;
pub mod gen;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod search;
