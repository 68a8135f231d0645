//! Error type shared by every stage of the scheduler

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, PodError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PodError {
    /// A caller-supplied value is outside the accepted domain
    /// (player count below 6, target grade outside `(0, 1]`, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Pod sizes or configurations that do not match the player set.
    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("no feasible configuration: candidate list is empty")]
    NoFeasibleConfiguration,

    /// Enumeration would produce more configurations than the runner allows.
    /// `configurations` saturates at `u128::MAX`.
    #[error(
        "enumerating {players} players yields {configurations} configurations (limit {limit})"
    )]
    EnumerationTooLarge {
        players: usize,
        configurations: u128,
        limit: u64,
    },

    #[error("target grade {target:.3} not reached after {rounds} rounds (grade {grade:.3})")]
    RoundLimitExceeded { rounds: u32, grade: f64, target: f64 },
}
