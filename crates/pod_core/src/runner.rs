//! Tournament runner: plays greedy rounds until the coverage target is met

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::enumerate::enumerate_configurations;
use crate::error::{PodError, Result};
use crate::history::PairingHistory;
use crate::planner::{count_configurations, plan_pod_sizes};
use crate::scheduler::{select_from_checked, SelectionMode};
use crate::types::{Player, RoundConfiguration};

/// Default cap on rounds played by [`TournamentRunner::run_until`]
pub const DEFAULT_MAX_ROUNDS: u32 = 64;

/// Default cap on the candidate set size. 13 players (about 1.2M
/// configurations) fit, 14 players (about 4.2M) do not.
pub const DEFAULT_MAX_CONFIGURATIONS: u64 = 2_000_000;

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub mode: SelectionMode,
    /// Give up after this many rounds
    pub max_rounds: u32,
    /// Refuse to enumerate player counts with more candidates than this
    pub max_configurations: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Best,
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_configurations: DEFAULT_MAX_CONFIGURATIONS,
        }
    }
}

/// Every legal round for one player count, with the plan it came from
#[derive(Debug)]
pub struct CandidateSet {
    pub total_players: usize,
    pub plan: Vec<usize>,
    pub configurations: Vec<RoundConfiguration>,
}

/// Candidate sets keyed by player count.
///
/// The legal rounds of a player count never change between rounds or runs,
/// so they are enumerated once and shared.
#[derive(Debug, Default)]
pub struct ConfigurationCache {
    entries: HashMap<usize, Arc<CandidateSet>>,
}

impl ConfigurationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate set for `total_players`, enumerating it on first use.
    pub fn get_or_enumerate(
        &mut self,
        total_players: usize,
        max_configurations: u64,
    ) -> Result<Arc<CandidateSet>> {
        if let Some(set) = self.entries.get(&total_players) {
            let count = set.configurations.len() as u128;
            if count > max_configurations as u128 {
                return Err(PodError::EnumerationTooLarge {
                    players: total_players,
                    configurations: count,
                    limit: max_configurations,
                });
            }
            return Ok(Arc::clone(set));
        }

        let plan = plan_pod_sizes(total_players)?;
        let count = count_configurations(total_players, &plan).unwrap_or(u128::MAX);
        if count > max_configurations as u128 {
            return Err(PodError::EnumerationTooLarge {
                players: total_players,
                configurations: count,
                limit: max_configurations,
            });
        }

        let players: Vec<Player> = (0..total_players).collect();
        let configurations = enumerate_configurations(&players, &plan)?;
        debug!(
            players = total_players,
            plan = ?plan,
            configurations = configurations.len(),
            "enumerated candidate configurations"
        );

        let set = Arc::new(CandidateSet {
            total_players,
            plan,
            configurations,
        });
        self.entries.insert(total_players, Arc::clone(&set));
        Ok(set)
    }

    pub fn contains(&self, total_players: usize) -> bool {
        self.entries.contains_key(&total_players)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One played round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: u32,
    pub pods: RoundConfiguration,
    /// Coverage grade after the round
    pub grade: f64,
    /// Position of the chosen configuration among the candidates
    pub candidate_index: usize,
    pub percentile: f64,
    pub early_exit: bool,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub total_players: usize,
    pub plan: Vec<usize>,
    pub mode: SelectionMode,
    pub target_grade: f64,
    pub candidates: usize,
    pub rounds: Vec<RoundRecord>,
    pub final_grade: f64,
    /// Distinct opponents of each player, ascending
    pub opponents: Vec<Vec<Player>>,
}

impl RunReport {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

/// Drives one tournament: owns the pairing history and plays rounds from a
/// shared candidate set.
#[derive(Debug)]
pub struct TournamentRunner {
    config: RunnerConfig,
    candidates: Arc<CandidateSet>,
    history: PairingHistory,
    rounds: Vec<RoundRecord>,
}

impl TournamentRunner {
    /// Runner with its own, unshared candidate set
    pub fn new(total_players: usize, config: RunnerConfig) -> Result<Self> {
        let mut cache = ConfigurationCache::new();
        Self::with_cache(total_players, config, &mut cache)
    }

    /// Runner that takes its candidates from `cache`
    pub fn with_cache(
        total_players: usize,
        config: RunnerConfig,
        cache: &mut ConfigurationCache,
    ) -> Result<Self> {
        let candidates = cache.get_or_enumerate(total_players, config.max_configurations)?;
        Ok(Self {
            config,
            history: PairingHistory::new(total_players),
            candidates,
            rounds: Vec::new(),
        })
    }

    pub fn total_players(&self) -> usize {
        self.candidates.total_players
    }

    pub fn plan(&self) -> &[usize] {
        &self.candidates.plan
    }

    pub fn candidates(&self) -> &[RoundConfiguration] {
        &self.candidates.configurations
    }

    pub fn history(&self) -> &PairingHistory {
        &self.history
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn grade(&self) -> f64 {
        self.history.grade()
    }

    /// Select the next round, apply it to the history and record it.
    pub fn play_round(&mut self) -> Result<&RoundRecord> {
        // The candidate set was enumerated over 0..total_players, the same
        // players the history holds.
        let selection =
            select_from_checked(&self.history, &self.candidates.configurations, self.config.mode)?;
        self.history.apply_round(&selection.configuration)?;

        let record = RoundRecord {
            round: self.rounds.len() as u32 + 1,
            grade: self.history.grade(),
            candidate_index: selection.index,
            percentile: selection.percentile(),
            early_exit: selection.early_exit,
            pods: selection.configuration,
        };
        info!(
            round = record.round,
            pods = %record.pods,
            grade = record.grade,
            "round played"
        );

        self.rounds.push(record);
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Play rounds until the coverage grade reaches `target_grade`.
    ///
    /// `target_grade` must lie in `(0, 1]`. Fails with
    /// [`PodError::RoundLimitExceeded`] once `max_rounds` rounds have been
    /// played without reaching it.
    pub fn run_until(&mut self, target_grade: f64) -> Result<RunReport> {
        if !(target_grade > 0.0 && target_grade <= 1.0) {
            return Err(PodError::InvalidInput(format!(
                "target grade must be in (0, 1], got {}",
                target_grade
            )));
        }

        while self.grade() < target_grade {
            if self.rounds.len() as u32 >= self.config.max_rounds {
                return Err(PodError::RoundLimitExceeded {
                    rounds: self.rounds.len() as u32,
                    grade: self.grade(),
                    target: target_grade,
                });
            }
            self.play_round()?;
        }

        info!(
            players = self.total_players(),
            rounds = self.rounds.len(),
            grade = self.grade(),
            target = target_grade,
            "target grade reached"
        );
        Ok(self.report(target_grade))
    }

    /// Snapshot of the run so far
    pub fn report(&self, target_grade: f64) -> RunReport {
        RunReport {
            total_players: self.total_players(),
            plan: self.plan().to_vec(),
            mode: self.config.mode,
            target_grade,
            candidates: self.candidates.configurations.len(),
            rounds: self.rounds.clone(),
            final_grade: self.grade(),
            opponents: (0..self.total_players())
                .map(|p| self.history.opponents(p))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
