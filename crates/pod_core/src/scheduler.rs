//! Greedy round selection: score every candidate configuration against the
//! current pairing history and pick the one that covers the most new pairs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PodError, Result};
use crate::history::PairingHistory;
use crate::types::RoundConfiguration;

/// Default grade multiplier for [`SelectionMode::GoodEnough`]
pub const DEFAULT_INCREASE: f64 = 1.3;

/// How a round is picked from the candidates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    /// Highest post-round grade; the earliest candidate wins ties.
    Best,
    /// First candidate whose post-round grade exceeds
    /// `grade before the round * increase`. Falls back to `Best` when no
    /// candidate qualifies.
    GoodEnough { increase: f64 },
}

impl SelectionMode {
    pub fn good_enough() -> Self {
        SelectionMode::GoodEnough {
            increase: DEFAULT_INCREASE,
        }
    }
}

/// Outcome of one scheduling decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Position of the winner in the candidate list
    pub index: usize,
    pub configuration: RoundConfiguration,
    /// Grade after applying the winner
    pub grade: f64,
    /// Grade before the round
    pub base_grade: f64,
    /// Size of the candidate list
    pub candidates: usize,
    /// Whether good-enough mode stopped at a qualifying candidate
    pub early_exit: bool,
}

impl Selection {
    /// How far into the candidate list the winner sits, in percent.
    /// Diagnostic only.
    pub fn percentile(&self) -> f64 {
        self.index as f64 / self.candidates as f64 * 100.0
    }
}

/// Pick the next round from `candidates`.
///
/// Every candidate is scored by the grade `history` would reach after it;
/// `history` itself is never modified. Scoring runs in parallel but the
/// result is the same as a front-to-back scan: among equal scores the lowest
/// index wins, and good-enough mode returns the first qualifying index.
pub fn select_best_round(
    history: &PairingHistory,
    candidates: &[RoundConfiguration],
    mode: SelectionMode,
) -> Result<Selection> {
    candidates
        .par_iter()
        .try_for_each(|config| history.check_players(config))?;
    select_from_checked(history, candidates, mode)
}

/// [`select_best_round`] for candidates already known to only seat players
/// of `history`, such as a cached candidate set of the same player count.
pub(crate) fn select_from_checked(
    history: &PairingHistory,
    candidates: &[RoundConfiguration],
    mode: SelectionMode,
) -> Result<Selection> {
    if candidates.is_empty() {
        return Err(PodError::NoFeasibleConfiguration);
    }
    let base_grade = history.grade();

    let early = match mode {
        SelectionMode::Best => None,
        SelectionMode::GoodEnough { increase } => {
            let threshold = base_grade * increase;
            candidates
                .par_iter()
                .enumerate()
                .find_first(|(_, config)| history.grade_after(config) > threshold)
                .map(|(index, _)| index)
        }
    };

    let (index, early_exit) = match early {
        Some(index) => (index, true),
        None => (best_index(history, candidates)?, false),
    };

    let configuration = candidates[index].clone();
    let selection = Selection {
        index,
        grade: history.grade_after(&configuration),
        configuration,
        base_grade,
        candidates: candidates.len(),
        early_exit,
    };

    debug!(
        index = selection.index,
        candidates = selection.candidates,
        percentile = selection.percentile(),
        grade = selection.grade,
        early_exit,
        "selected round configuration"
    );

    Ok(selection)
}

/// Index of the highest-scoring candidate, lowest index on ties
fn best_index(history: &PairingHistory, candidates: &[RoundConfiguration]) -> Result<usize> {
    candidates
        .par_iter()
        .enumerate()
        .map(|(index, config)| (history.met_after(config), index))
        .reduce_with(|a, b| {
            if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
                b
            } else {
                a
            }
        })
        .map(|(_, index)| index)
        .ok_or(PodError::NoFeasibleConfiguration)
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
