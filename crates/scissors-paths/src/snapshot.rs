//! Progress snapshots of a running search.
//!
//! The engine mirrors its per-node classification into a [`ProgressBoard`]
//! guarded by its own lock. Readers on other threads copy the board into an
//! immutable [`ProgressSnapshot`] and never touch the engine's queue or
//! distance tables.

use scissors_core::{Point, Range};

/// Search classification of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeState {
    /// No finite distance known yet.
    #[default]
    Undiscovered,
    /// Has a tentative distance and sits in the queue.
    Frontier,
    /// Distance is final.
    Settled,
}

/// Point-in-time view of which nodes are settled or on the frontier.
///
/// Snapshots are plain values: they never change after construction and are
/// cheap to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    rng: Range,
    states: Vec<NodeState>,
    settled: usize,
    frontier: usize,
}

impl ProgressSnapshot {
    pub(crate) fn from_states(rng: Range, states: &[NodeState]) -> Self {
        let mut settled = 0;
        let mut frontier = 0;
        for s in states {
            match s {
                NodeState::Settled => settled += 1,
                NodeState::Frontier => frontier += 1,
                NodeState::Undiscovered => {}
            }
        }
        Self {
            rng,
            states: states.to_vec(),
            settled,
            frontier,
        }
    }

    /// The range the snapshot covers.
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Classification of `p`; points outside the range are undiscovered.
    pub fn state(&self, p: Point) -> NodeState {
        self.rng
            .offset(p)
            .map_or(NodeState::Undiscovered, |i| self.states[i])
    }

    /// Whether the shortest distance to `p` was final when the snapshot was
    /// taken.
    pub fn settled(&self, p: Point) -> bool {
        self.state(p) == NodeState::Settled
    }

    /// Whether `p` was settled or on the frontier.
    pub fn discovered(&self, p: Point) -> bool {
        self.state(p) != NodeState::Undiscovered
    }

    pub fn settled_count(&self) -> usize {
        self.settled
    }

    pub fn frontier_count(&self) -> usize {
        self.frontier
    }

    /// Settled points in row-major order.
    pub fn settled_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.rng
            .iter()
            .zip(self.states.iter())
            .filter(|(_, s)| **s == NodeState::Settled)
            .map(|(p, _)| p)
    }
}

/// Lock-protected copy of the engine's node classification.
#[derive(Debug)]
pub(crate) struct ProgressBoard {
    rng: Range,
    states: Vec<NodeState>,
    live: bool,
}

impl ProgressBoard {
    /// A board for an engine that has not started a session.
    pub(crate) fn idle(rng: Range) -> Self {
        Self {
            rng,
            states: Vec::new(),
            live: false,
        }
    }

    /// A board for a fresh session: every node undiscovered.
    pub(crate) fn live(rng: Range) -> Self {
        Self {
            rng,
            states: vec![NodeState::Undiscovered; rng.len()],
            live: true,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live
    }

    /// Apply a batch of classification changes recorded by the engine.
    pub(crate) fn apply(&mut self, changes: &[(usize, NodeState)]) {
        for &(i, s) in changes {
            self.states[i] = s;
        }
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::from_states(self.rng, &self.states)
    }
}
