//! Pod-size planning: how many 4-pods and 3-pods seat everybody exactly once

use crate::error::{PodError, Result};
use crate::types::{MAX_POD_SIZE, MIN_POD_SIZE};

/// Fewest players that can always be split into pods of 3 and 4.
pub const MIN_PLAYERS: usize = 6;

/// Decide the pod sizes for one round of `total_players`.
///
/// 4-pods are preferred: the plan is first filled with 4s, and while the
/// total overshoots one 4 at a time is traded for as many 3s as needed. The
/// returned plan lists the remaining 4s first, then the 3s, and carries the
/// largest number of 4-pods any exact split of `total_players` can have.
pub fn plan_pod_sizes(total_players: usize) -> Result<Vec<usize>> {
    if total_players < MIN_PLAYERS {
        return Err(PodError::InvalidInput(format!(
            "at least {} players are needed to fill pods of 3 and 4, got {}",
            MIN_PLAYERS, total_players
        )));
    }

    let mut sizes = Vec::with_capacity(total_players / MIN_POD_SIZE + 1);
    let mut seated = 0;

    while seated < total_players {
        seated += MAX_POD_SIZE;
        sizes.push(MAX_POD_SIZE);
    }

    while seated != total_players {
        // Every n >= 6 is reached before the 4s run out, since gcd(3, 4) = 1.
        let Some(pos) = sizes.iter().position(|&s| s == MAX_POD_SIZE) else {
            return Err(PodError::InvalidInput(format!(
                "{} players cannot be split into pods of 3 and 4",
                total_players
            )));
        };
        sizes.remove(pos);
        seated -= MAX_POD_SIZE;

        while seated < total_players {
            seated += MIN_POD_SIZE;
            sizes.push(MIN_POD_SIZE);
        }
    }

    Ok(sizes)
}

/// Number of configurations `enumerate_configurations` yields for
/// `total_players` and `sizes`, or `None` if it does not fit in a `u128`.
///
/// Sizes are consumed from the back, each pod choosing among the players the
/// earlier pods left over.
pub fn count_configurations(total_players: usize, sizes: &[usize]) -> Option<u128> {
    let mut remaining = total_players;
    let mut count: u128 = 1;

    for &size in sizes.iter().rev() {
        if size > remaining {
            return Some(0);
        }
        count = count.checked_mul(binomial(remaining, size)?)?;
        remaining -= size;
    }

    Some(count)
}

/// `n choose k`, `None` on overflow
fn binomial(n: usize, k: usize) -> Option<u128> {
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod planner_tests;
