//! Partition enumeration: every way to split the players into pods of the
//! planned sizes.
//!
//! The output order is fully determined by the (sorted) player order and the
//! lexicographic combination order, and the scheduler breaks ties by the
//! first index it meets. Keep both stable.

use rayon::prelude::*;

use crate::error::{PodError, Result};
use crate::types::{Player, Pod, RoundConfiguration, MAX_POD_SIZE, MIN_POD_SIZE};

/// Enumerate every round configuration of `players` into pods of `sizes`.
///
/// Sizes are consumed from the back of the plan: the first pod of each
/// configuration has size `sizes[len - 1]`, the next `sizes[len - 2]` and so
/// on, every pod choosing among the players the earlier pods left over.
/// Pod order is part of the output, so a split reached through two different
/// first pods is listed twice (n=8, plan `[4, 4]` gives 70 configurations).
///
/// Players are sorted before enumeration; the caller's order does not matter.
pub fn enumerate_configurations(
    players: &[Player],
    sizes: &[usize],
) -> Result<Vec<RoundConfiguration>> {
    let mut sorted = players.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.len() != players.len() {
        return Err(PodError::InvalidPlan(
            "player set contains duplicates".to_string(),
        ));
    }
    if let Some(&bad) = sizes
        .iter()
        .find(|s| !(MIN_POD_SIZE..=MAX_POD_SIZE).contains(*s))
    {
        return Err(PodError::InvalidPlan(format!(
            "pod size {} is outside {}..={}",
            bad, MIN_POD_SIZE, MAX_POD_SIZE
        )));
    }
    let seats: usize = sizes.iter().sum();
    if seats != sorted.len() {
        return Err(PodError::InvalidPlan(format!(
            "pod sizes {:?} seat {} players, but there are {}",
            sizes,
            seats,
            sorted.len()
        )));
    }

    Ok(extend(&sorted, sizes, Vec::new()))
}

/// Consume the last size of `sizes`, growing every partial configuration by
/// one pod, and recurse on the rest.
fn extend(
    players: &[Player],
    sizes: &[usize],
    partial: Vec<RoundConfiguration>,
) -> Vec<RoundConfiguration> {
    let Some((&size, rest)) = sizes.split_last() else {
        return partial;
    };

    let grown = if partial.is_empty() {
        let mut seeded = Vec::new();
        for_each_combination(players, size, |pod| {
            seeded.push(RoundConfiguration::new(vec![Pod::from_sorted(pod)]));
        });
        seeded
    } else {
        // collect() keeps the sequential order
        partial
            .par_iter()
            .flat_map_iter(|config| extend_one(players, config, size))
            .collect()
    };

    extend(players, rest, grown)
}

/// Every extension of `config` by one pod of `size` unused players
fn extend_one(players: &[Player], config: &RoundConfiguration, size: usize) -> Vec<RoundConfiguration> {
    let mut used = vec![false; players.len()];
    for player in config.players() {
        if let Ok(i) = players.binary_search(&player) {
            used[i] = true;
        }
    }
    let remaining: Vec<Player> = players
        .iter()
        .zip(&used)
        .filter(|(_, taken)| !**taken)
        .map(|(&p, _)| p)
        .collect();

    let mut out = Vec::new();
    for_each_combination(&remaining, size, |pod| {
        let mut next = config.clone();
        next.push(Pod::from_sorted(pod));
        out.push(next);
    });
    out
}

/// Call `f` with every `k`-combination of `pool`, in lexicographic order of
/// positions. Each combination keeps `pool`'s order.
pub(crate) fn for_each_combination(pool: &[Player], k: usize, mut f: impl FnMut(&[Player])) {
    let n = pool.len();
    if k > n {
        return;
    }

    let mut idx: Vec<usize> = (0..k).collect();
    let mut combo = vec![0; k];

    loop {
        for (slot, &i) in combo.iter_mut().zip(&idx) {
            *slot = pool[i];
        }
        f(&combo);

        // rightmost position that can still advance
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod enumerate_tests;
