//! Parameter search.
//!
//! Finds the smallest attack power that lets a protected faction win
//! without a single loss.

pub mod power;

pub use power::{PowerSearch, SearchError, SearchResult};
