//! Pod scheduling core
//!
//! Seats a multiplayer tournament in pods of 3 and 4 so that, round after
//! round, every player meets as many new opponents as possible:
//! - Planning how many pods of each size seat everybody exactly once
//! - Enumerating every legal round for a player count
//! - Greedily picking the round that covers the most unmet pairs
//! - Running rounds until a coverage target is reached
//!
//! # Usage
//!
//! ```
//! use pod_core::{RunnerConfig, TournamentRunner};
//!
//! let mut runner = TournamentRunner::new(6, RunnerConfig::default()).unwrap();
//! let report = runner.run_until(1.0).unwrap();
//! assert_eq!(report.final_grade, 1.0);
//! ```

mod enumerate;
mod error;
mod history;
mod planner;
mod runner;
mod scheduler;
mod types;

pub use enumerate::*;
pub use error::*;
pub use history::*;
pub use planner::*;
pub use runner::*;
pub use scheduler::*;
pub use types::*;
