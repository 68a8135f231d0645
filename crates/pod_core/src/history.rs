//! Pairing history: who has already shared a pod with whom

use crate::error::{PodError, Result};
use crate::types::{Player, RoundConfiguration};

const WORD_BITS: usize = u64::BITS as usize;

/// Symmetric record of every pair of players that has shared a pod.
///
/// Stored as one bitset row per player. Entries are only ever added, so the
/// grade never decreases. `Clone` is a full snapshot and shares nothing with
/// the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingHistory {
    total_players: usize,
    words_per_row: usize,
    rows: Vec<u64>,
    /// Set bits across all rows (each unordered pair counts twice)
    met: usize,
}

impl PairingHistory {
    /// Empty history for players `0..total_players`
    pub fn new(total_players: usize) -> Self {
        let words_per_row = total_players.div_ceil(WORD_BITS);
        Self {
            total_players,
            words_per_row,
            rows: vec![0; words_per_row * total_players],
            met: 0,
        }
    }

    pub fn total_players(&self) -> usize {
        self.total_players
    }

    /// Whether `a` and `b` have shared a pod. A player never meets itself.
    pub fn has_met(&self, a: Player, b: Player) -> bool {
        if a == b || a >= self.total_players || b >= self.total_players {
            return false;
        }
        let (word, bit) = self.slot(a, b);
        self.rows[word] & bit != 0
    }

    /// Distinct opponents `player` has faced, ascending
    pub fn opponents(&self, player: Player) -> Vec<Player> {
        (0..self.total_players)
            .filter(|&other| self.has_met(player, other))
            .collect()
    }

    /// Number of distinct opponents `player` has faced
    pub fn opponent_count(&self, player: Player) -> usize {
        if player >= self.total_players {
            return 0;
        }
        let start = player * self.words_per_row;
        self.rows[start..start + self.words_per_row]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Number of unordered pairs that have met
    pub fn pair_count(&self) -> usize {
        self.met / 2
    }

    /// Coverage grade: the average over players of
    /// `distinct opponents / (total players - 1)`, in `[0, 1]`.
    pub fn grade(&self) -> f64 {
        self.grade_of(self.met)
    }

    /// The grade this history would have after `config`, without touching it.
    ///
    /// Assumes the pods of `config` are disjoint, as every enumerated
    /// configuration is.
    pub fn grade_after(&self, config: &RoundConfiguration) -> f64 {
        self.grade_of(self.met_after(config))
    }

    /// Record every pair inside every pod of `config`. Re-recording a pair is
    /// a no-op, so applying the same round twice equals applying it once.
    pub fn apply_round(&mut self, config: &RoundConfiguration) -> Result<()> {
        self.check_players(config)?;
        for pod in config.pods() {
            for (a, b) in pod.pairs() {
                self.record_pair(a, b);
            }
        }
        Ok(())
    }

    /// Snapshot of this history with `config` applied
    pub fn with_round(&self, config: &RoundConfiguration) -> Result<Self> {
        let mut next = self.clone();
        next.apply_round(config)?;
        Ok(next)
    }

    /// Met-pair bit count after `config`; the exact score the scheduler
    /// compares candidates by.
    pub(crate) fn met_after(&self, config: &RoundConfiguration) -> usize {
        let fresh: usize = config
            .pods()
            .iter()
            .flat_map(|pod| pod.pairs())
            .filter(|&(a, b)| !self.has_met(a, b))
            .count();
        self.met + 2 * fresh
    }

    pub(crate) fn grade_of(&self, met: usize) -> f64 {
        if self.total_players < 2 {
            return 0.0;
        }
        let possible = self.total_players * (self.total_players - 1);
        met as f64 / possible as f64
    }

    /// Every player of `config` must have a row in this history.
    pub(crate) fn check_players(&self, config: &RoundConfiguration) -> Result<()> {
        match config.players().find(|&p| p >= self.total_players) {
            Some(p) => Err(PodError::InvalidPlan(format!(
                "player {} is outside a history of {} players",
                p, self.total_players
            ))),
            None => Ok(()),
        }
    }

    fn record_pair(&mut self, a: Player, b: Player) {
        if a == b || self.has_met(a, b) {
            return;
        }
        let (word, bit) = self.slot(a, b);
        self.rows[word] |= bit;
        let (word, bit) = self.slot(b, a);
        self.rows[word] |= bit;
        self.met += 2;
    }

    /// Word index and mask of `b` in `a`'s row
    #[inline]
    fn slot(&self, a: Player, b: Player) -> (usize, u64) {
        (
            a * self.words_per_row + b / WORD_BITS,
            1u64 << (b % WORD_BITS),
        )
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
