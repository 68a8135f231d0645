//! Core data types: players, pods and round configurations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PodError, Result};

/// Players are identified by their index `0..N-1`.
pub type Player = usize;

/// Smallest pod the planner will produce
pub const MIN_POD_SIZE: usize = 3;

/// Largest pod the planner will produce (and the preferred size)
pub const MAX_POD_SIZE: usize = 4;

/// A group of 3 or 4 distinct players seated together for one round.
///
/// Members are kept sorted, so two pods with the same players compare equal
/// no matter in which order they were built. The members live inline, which
/// keeps the candidate set of a player count to one allocation per
/// configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Player>", into = "Vec<Player>")]
pub struct Pod {
    members: [Player; MAX_POD_SIZE],
    len: u8,
}

impl Pod {
    /// Build a pod from any collection of players.
    ///
    /// Fails with [`PodError::InvalidInput`] if the pod would not have 3 or 4
    /// distinct members.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Result<Self> {
        let mut players: Vec<Player> = players.into_iter().collect();
        players.sort_unstable();
        players.dedup();

        if !(MIN_POD_SIZE..=MAX_POD_SIZE).contains(&players.len()) {
            return Err(PodError::InvalidInput(format!(
                "a pod needs {} to {} distinct players, got {:?}",
                MIN_POD_SIZE, MAX_POD_SIZE, players
            )));
        }
        Ok(Self::from_sorted(&players))
    }

    /// Caller guarantees `players` is sorted, distinct and 3..=4 long.
    pub(crate) fn from_sorted(players: &[Player]) -> Self {
        debug_assert!((MIN_POD_SIZE..=MAX_POD_SIZE).contains(&players.len()));
        let mut members = [0; MAX_POD_SIZE];
        members[..players.len()].copy_from_slice(players);
        Self {
            members,
            len: players.len() as u8,
        }
    }

    /// Members in ascending order
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.members[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; pods have at least three members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, player: Player) -> bool {
        self.players().contains(&player)
    }

    /// Every unordered pair of members, `(low, high)`.
    pub fn pairs(&self) -> impl Iterator<Item = (Player, Player)> + '_ {
        let players = self.players();
        players
            .iter()
            .enumerate()
            .flat_map(move |(i, &a)| players[i + 1..].iter().map(move |&b| (a, b)))
    }
}

impl TryFrom<Vec<Player>> for Pod {
    type Error = PodError;

    fn try_from(players: Vec<Player>) -> Result<Self> {
        Pod::new(players)
    }
}

impl From<Pod> for Vec<Player> {
    fn from(pod: Pod) -> Self {
        pod.players().to_vec()
    }
}

impl fmt::Debug for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.players()).finish()
    }
}

impl fmt::Display for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, player) in self.players().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", player)?;
        }
        write!(f, "}}")
    }
}

/// One round: disjoint pods that together seat every player exactly once.
///
/// Pods keep the order the enumerator built them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundConfiguration {
    pods: Vec<Pod>,
}

impl RoundConfiguration {
    pub fn new(pods: Vec<Pod>) -> Self {
        Self { pods }
    }

    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    /// Number of pods in the round
    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    /// All seated players, pod by pod
    pub fn players(&self) -> impl Iterator<Item = Player> + '_ {
        self.pods.iter().flat_map(|pod| pod.players().iter().copied())
    }

    pub(crate) fn push(&mut self, pod: Pod) {
        self.pods.push(pod);
    }
}

impl fmt::Display for RoundConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pod) in self.pods.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", pod)?;
        }
        Ok(())
    }
}

impl From<Vec<Pod>> for RoundConfiguration {
    fn from(pods: Vec<Pod>) -> Self {
        Self::new(pods)
    }
}
