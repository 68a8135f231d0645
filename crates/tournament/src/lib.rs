//! Pod tournament driver
//!
//! This crate wraps `pod_core` for the command line:
//! - Loading driver defaults from a TOML config file
//! - Running one tournament or a sweep over player counts
//! - Generating text and JSON reports of the schedules
//!
//! # Usage
//!
//! ```bash
//! # Schedule 10 players until everybody met 90% of the field
//! cargo run -p tournament -- run --players 10 --target 90
//!
//! # Rounds needed for every player count from 6 to 12
//! cargo run -p tournament -- sweep --from 6 --to 12 --target 1.0
//! ```

mod config;
mod results;

pub use config::*;
pub use results::*;
