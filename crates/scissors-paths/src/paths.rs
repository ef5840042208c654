use scissors_core::{Point, Range};

use crate::error::SearchError;

/// Sentinel distance for nodes without a known path.
pub const UNREACHABLE: u64 = u64::MAX;

/// Parent link of the seed (and of undiscovered nodes).
pub(crate) const NO_PARENT: usize = usize::MAX;

/// A position with its distance from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: u64,
}

/// Follow parent links from `target` back to the root and return the points
/// root-first.
pub(crate) fn trace_back(rng: Range, parent: &[usize], target: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut i = target;
    while i != NO_PARENT {
        path.push(rng.point_at(i));
        i = parent[i];
    }
    path.reverse();
    path
}

/// The shortest-path tree of a search that ran to exhaustion.
///
/// Every distance is final, so paths never change; queries are cheap and
/// need no locking.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub(crate) rng: Range,
    pub(crate) seed: Point,
    pub(crate) dist: Vec<u64>,
    pub(crate) parent: Vec<usize>,
    pub(crate) order: Vec<usize>,
}

impl ShortestPaths {
    /// The range the search covered.
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Where the search started.
    pub fn seed(&self) -> Point {
        self.seed
    }

    /// Number of reached nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Shortest distance from the seed to `p`, or `None` if `p` is outside
    /// the range or unreachable.
    pub fn distance(&self, p: Point) -> Option<u64> {
        let i = self.rng.offset(p)?;
        let d = self.dist[i];
        (d != UNREACHABLE).then_some(d)
    }

    /// A minimum-cost path from the seed to `target`, seed first.
    pub fn path_to(&self, target: Point) -> Result<Vec<Point>, SearchError> {
        let i = self
            .rng
            .offset(target)
            .ok_or(SearchError::InvalidNode(target))?;
        if self.dist[i] == UNREACHABLE {
            return Err(SearchError::NotReached(target));
        }
        Ok(trace_back(self.rng, &self.parent, i))
    }

    /// Every reached node in the order it was settled (non-decreasing cost).
    pub fn reached(&self) -> impl Iterator<Item = PathNode> + '_ {
        self.order.iter().map(|&i| PathNode {
            pos: self.rng.point_at(i),
            cost: self.dist[i],
        })
    }
}
