//! Error types for the automaton system.

use thiserror::Error;

use crate::rule::Neighborhood;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors that can occur during automaton operations.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// Rule index outside the 256 elementary rules.
    #[error("invalid rule index: {index} (must be in 0..=255)")]
    InvalidRuleIndex { index: i64 },

    /// A rule mapping does not cover every neighborhood.
    #[error("malformed rule table: no entry for neighborhood {key}")]
    MalformedRuleTable { key: Neighborhood },

    /// A state must hold at least one cell.
    #[error("state must contain at least one cell")]
    EmptyState,

    /// A cell value other than 0 or 1.
    #[error("invalid cell value: {value} (must be 0 or 1)")]
    InvalidCell { value: u8 },

    /// A state string contained something other than `0` or `1`.
    #[error("invalid character {character:?} at position {position} in state string")]
    ParseState { character: char, position: usize },

    /// Iteration count is invalid.
    #[error("invalid iteration count: {iters} (must be >= 1)")]
    InvalidIterations { iters: usize },

    /// Activation probability outside the unit interval.
    #[error("invalid activation probability: {probability} (must be in [0, 1])")]
    InvalidProbability { probability: f64 },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
