//! Incremental single-source shortest-path search over a pixel grid.
//!
//! A [`ShortestPathEngine`] runs Dijkstra's algorithm one settled node at a
//! time so callers can interleave rendering and cancellation checks with the
//! search. Other threads observe progress through a [`SearchHandle`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use scissors_core::{Point, Range};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::neighbors::Neighbors;
use crate::paths::{NO_PARENT, PathNode, ShortestPaths, UNREACHABLE, trace_back};
use crate::queue::IndexedPriorityQueue;
use crate::snapshot::{NodeState, ProgressBoard, ProgressSnapshot};
use crate::traits::EdgeWeight;

/// Lifecycle of the engine's current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    /// No session has been started.
    Idle,
    /// Nodes remain on the frontier.
    Running,
    /// Every reachable node is settled.
    Exhausted,
    /// The session was cancelled and its state discarded.
    Cancelled,
}

/// Result of a single [`ShortestPathEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// This node's distance became final.
    Settled(PathNode),
    /// The frontier is empty; further steps do nothing.
    Exhausted,
}

/// State shared between an engine and its handles for one session.
#[derive(Debug)]
struct Shared {
    cancelled: AtomicBool,
    board: RwLock<ProgressBoard>,
}

impl Shared {
    fn new(board: ProgressBoard) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            board: RwLock::new(board),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn snapshot(&self) -> Result<ProgressSnapshot, SearchError> {
        if self.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let board = self.board.read().unwrap_or_else(PoisonError::into_inner);
        if !board.is_live() {
            return Err(SearchError::NotStarted);
        }
        Ok(board.snapshot())
    }
}

/// Thread-safe view of one search session.
///
/// Handles can cancel the session and take progress snapshots while another
/// thread is stepping the engine. A handle stays tied to the session that was
/// current when it was created: once the engine starts a new seed, the old
/// handle reports [`SearchError::Cancelled`].
#[derive(Debug, Clone)]
pub struct SearchHandle {
    shared: Arc<Shared>,
}

impl SearchHandle {
    /// Request cancellation. The engine stops at the start of its next step.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    /// Copy of the most recently published progress.
    ///
    /// The engine publishes every [`SearchConfig::publish_interval`] steps
    /// and whenever a run returns, so the snapshot may trail the engine by a
    /// few steps but always reflects a state between two steps.
    pub fn snapshot(&self) -> Result<ProgressSnapshot, SearchError> {
        self.shared.snapshot()
    }
}

/// Dijkstra search from a single seed over the pixels of a [`Range`].
///
/// Nodes are pixels; edges join each pixel to its 4 or 8 neighbours inside
/// the range, weighted by an [`EdgeWeight`]. The engine keeps the distance
/// and predecessor tables of one session at a time and reuses their storage
/// across sessions.
pub struct ShortestPathEngine {
    rng: Range,
    config: SearchConfig,
    phase: SearchPhase,
    seed: Point,
    weight: Option<Arc<dyn EdgeWeight>>,
    dist: Vec<u64>,
    parent: Vec<usize>,
    state: Vec<NodeState>,
    order: Vec<usize>,
    queue: IndexedPriorityQueue<usize, u64>,
    shared: Arc<Shared>,
    // classification changes not yet copied to the shared board
    pending: Vec<(usize, NodeState)>,
    since_publish: usize,
    neighbors: Neighbors,
}

impl ShortestPathEngine {
    /// Create an idle engine for searches confined to `rng`.
    pub fn new(rng: Range, config: SearchConfig) -> Self {
        let len = rng.len();
        Self {
            rng,
            config,
            phase: SearchPhase::Idle,
            seed: rng.min,
            weight: None,
            dist: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
            state: vec![NodeState::Undiscovered; len],
            order: Vec::new(),
            queue: IndexedPriorityQueue::new(),
            shared: Arc::new(Shared::new(ProgressBoard::idle(rng))),
            pending: Vec::new(),
            since_publish: 0,
            neighbors: Neighbors::new(),
        }
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Current phase, taking pending cancellation requests into account.
    pub fn phase(&self) -> SearchPhase {
        match self.phase {
            SearchPhase::Running | SearchPhase::Exhausted if self.shared.is_cancelled() => {
                SearchPhase::Cancelled
            }
            phase => phase,
        }
    }

    /// Seed of the active session.
    pub fn seed(&self) -> Option<Point> {
        match self.phase() {
            SearchPhase::Running | SearchPhase::Exhausted => Some(self.seed),
            SearchPhase::Idle | SearchPhase::Cancelled => None,
        }
    }

    /// Handle for cancelling and observing the current session from other
    /// threads.
    ///
    /// The handle follows this session only. Once [`start`](Self::start)
    /// begins another one (including the first session of an idle engine),
    /// the handle reports [`SearchError::Cancelled`]; take a new one.
    pub fn handle(&self) -> SearchHandle {
        SearchHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Begin a new session from `seed`, discarding any previous one.
    ///
    /// Fails with [`SearchError::InvalidNode`] if `seed` is outside the range,
    /// in which case the previous session is left untouched.
    pub fn start(&mut self, seed: Point, weight: Arc<dyn EdgeWeight>) -> Result<(), SearchError> {
        let si = self.rng.offset(seed).ok_or(SearchError::InvalidNode(seed))?;
        if matches!(self.phase, SearchPhase::Running | SearchPhase::Exhausted) {
            log::debug!("discarding search from {} for new seed {}", self.seed, seed);
        }
        // Handles to the replaced session, idle or not, must not look live.
        self.shared.cancelled.store(true, Ordering::Release);
        self.reset_tables();
        self.shared = Arc::new(Shared::new(ProgressBoard::live(self.rng)));
        self.seed = seed;
        self.weight = Some(weight);

        self.dist[si] = 0;
        self.mark(si, NodeState::Frontier);
        self.queue.add_or_update(si, 0);
        self.phase = SearchPhase::Running;
        self.publish();
        log::debug!("search started at {} over {}", seed, self.rng);
        Ok(())
    }

    /// Cancel the current session and discard its state. Does nothing when
    /// idle.
    pub fn cancel(&mut self) {
        if self.phase == SearchPhase::Idle {
            return;
        }
        self.shared.cancelled.store(true, Ordering::Release);
        if self.phase != SearchPhase::Cancelled {
            self.discard();
        }
    }

    /// Settle the next frontier node and relax its neighbours.
    pub fn step(&mut self) -> Result<StepOutcome, SearchError> {
        self.observe_cancel();
        match self.phase {
            SearchPhase::Idle => return Err(SearchError::NotStarted),
            SearchPhase::Cancelled => return Err(SearchError::Cancelled),
            SearchPhase::Exhausted => return Ok(StepOutcome::Exhausted),
            SearchPhase::Running => {}
        }
        let Some(weight) = self.weight.clone() else {
            return Err(SearchError::NotStarted);
        };

        let u = loop {
            match self.queue.pop() {
                Err(_) => {
                    self.phase = SearchPhase::Exhausted;
                    self.publish();
                    log::debug!(
                        "search from {} exhausted after settling {} nodes",
                        self.seed,
                        self.order.len()
                    );
                    return Ok(StepOutcome::Exhausted);
                }
                // Not reachable through add_or_update, which keeps keys unique.
                Ok((u, _)) if self.state[u] == NodeState::Settled => continue,
                Ok((u, _)) => break u,
            }
        };

        self.mark(u, NodeState::Settled);
        self.order.push(u);
        let up = self.rng.point_at(u);
        let du = self.dist[u];

        let mut neighbors = std::mem::take(&mut self.neighbors);
        for &vp in neighbors.within(self.rng, up, self.config.connectivity) {
            let Some(v) = self.rng.offset(vp) else {
                continue;
            };
            let sv = self.state[v];
            if sv == NodeState::Settled {
                continue;
            }
            let candidate = du.saturating_add(u64::from(weight.weight(up, vp)));
            if sv == NodeState::Undiscovered || candidate < self.dist[v] {
                self.dist[v] = candidate;
                self.parent[v] = u;
                if sv == NodeState::Undiscovered {
                    self.mark(v, NodeState::Frontier);
                }
                self.queue.add_or_update(v, candidate);
            }
        }
        self.neighbors = neighbors;

        self.since_publish += 1;
        if self.since_publish >= self.config.publish_interval.max(1) {
            self.publish();
        }
        Ok(StepOutcome::Settled(PathNode { pos: up, cost: du }))
    }

    /// Perform up to `max_steps` settling steps. Returns how many nodes were
    /// settled, which is less than `max_steps` only if the search ran out of
    /// nodes.
    pub fn run_for(&mut self, max_steps: usize) -> Result<usize, SearchError> {
        let mut steps = 0;
        while steps < max_steps {
            match self.step()? {
                StepOutcome::Settled(_) => steps += 1,
                StepOutcome::Exhausted => break,
            }
        }
        self.publish();
        Ok(steps)
    }

    /// Step until the search is exhausted. Returns the number of nodes
    /// settled by this call.
    pub fn run(&mut self) -> Result<usize, SearchError> {
        let mut steps = 0;
        while let StepOutcome::Settled(_) = self.step()? {
            steps += 1;
        }
        self.publish();
        Ok(steps)
    }

    /// Step until `target` is settled, so that its path is final.
    pub fn run_until_settled(&mut self, target: Point) -> Result<(), SearchError> {
        let ti = self
            .rng
            .offset(target)
            .ok_or(SearchError::InvalidNode(target))?;
        while self.state[ti] != NodeState::Settled {
            if self.step()? == StepOutcome::Exhausted {
                self.publish();
                return Err(SearchError::NotReached(target));
            }
        }
        self.publish();
        Ok(())
    }

    /// Current path from the seed to `target`, seed first.
    ///
    /// For a frontier target the path is provisional and may still be
    /// replaced by a cheaper one.
    pub fn query_path(&self, target: Point) -> Result<Vec<Point>, SearchError> {
        self.check_session()?;
        let ti = self
            .rng
            .offset(target)
            .ok_or(SearchError::InvalidNode(target))?;
        if self.state[ti] == NodeState::Undiscovered {
            return Err(SearchError::NotReached(target));
        }
        Ok(trace_back(self.rng, &self.parent, ti))
    }

    /// Best known distance to `p`, if it has been discovered.
    pub fn distance(&self, p: Point) -> Option<u64> {
        self.check_session().ok()?;
        let i = self.rng.offset(p)?;
        let d = self.dist[i];
        (d != UNREACHABLE).then_some(d)
    }

    /// Classification of `p` in the current session.
    pub fn state(&self, p: Point) -> NodeState {
        if self.check_session().is_err() {
            return NodeState::Undiscovered;
        }
        self.rng
            .offset(p)
            .map_or(NodeState::Undiscovered, |i| self.state[i])
    }

    /// Number of settled nodes.
    pub fn settled_count(&self) -> usize {
        self.order.len()
    }

    /// Number of frontier nodes.
    pub fn frontier_count(&self) -> usize {
        self.queue.len()
    }

    /// Exact progress as of the last completed step.
    pub fn snapshot(&self) -> Result<ProgressSnapshot, SearchError> {
        self.check_session()?;
        Ok(ProgressSnapshot::from_states(self.rng, &self.state))
    }

    /// Run the session to exhaustion and return its shortest-path tree.
    pub fn finish(mut self) -> Result<ShortestPaths, SearchError> {
        self.run()?;
        Ok(ShortestPaths {
            rng: self.rng,
            seed: self.seed,
            dist: std::mem::take(&mut self.dist),
            parent: std::mem::take(&mut self.parent),
            order: std::mem::take(&mut self.order),
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_session(&self) -> Result<(), SearchError> {
        match self.phase() {
            SearchPhase::Idle => Err(SearchError::NotStarted),
            SearchPhase::Cancelled => Err(SearchError::Cancelled),
            SearchPhase::Running | SearchPhase::Exhausted => Ok(()),
        }
    }

    fn observe_cancel(&mut self) {
        if matches!(self.phase, SearchPhase::Running | SearchPhase::Exhausted)
            && self.shared.is_cancelled()
        {
            self.discard();
        }
    }

    fn discard(&mut self) {
        log::debug!(
            "search from {} cancelled after settling {} nodes",
            self.seed,
            self.order.len()
        );
        self.reset_tables();
        self.weight = None;
        self.phase = SearchPhase::Cancelled;
    }

    fn reset_tables(&mut self) {
        self.dist.fill(UNREACHABLE);
        self.parent.fill(NO_PARENT);
        self.state.fill(NodeState::Undiscovered);
        self.order.clear();
        self.queue.clear();
        self.pending.clear();
        self.since_publish = 0;
    }

    #[inline]
    fn mark(&mut self, i: usize, s: NodeState) {
        self.state[i] = s;
        self.pending.push((i, s));
    }

    /// Copy pending classification changes to the shared board in one
    /// critical section.
    fn publish(&mut self) {
        self.since_publish = 0;
        if self.pending.is_empty() {
            return;
        }
        let mut board = self
            .shared
            .board
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        board.apply(&self.pending);
        drop(board);
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Connectivity;
    use crate::weight::UniformWeight;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::HashMap;
    use std::thread;

    fn four() -> SearchConfig {
        SearchConfig::default().with_connectivity(Connectivity::Four)
    }

    fn unit() -> Arc<dyn EdgeWeight> {
        Arc::new(UniformWeight::new(1))
    }

    /// Edge weights drawn at random per directed pair, so the search sees a
    /// non-trivial cost surface.
    fn random_weights(rng: Range, seed: u64) -> Arc<HashMap<(Point, Point), u32>> {
        let mut r = StdRng::seed_from_u64(seed);
        let mut map = HashMap::new();
        for p in rng.iter() {
            for n in p.neighbors_8() {
                if rng.contains(n) {
                    map.insert((p, n), r.random_range(0..20u32));
                }
            }
        }
        Arc::new(map)
    }

    /// Plain O(n^2) Dijkstra used as an oracle.
    fn reference_distances(
        rng: Range,
        conn: Connectivity,
        seed: Point,
        w: &dyn Fn(Point, Point) -> u32,
    ) -> Vec<u64> {
        let n = rng.len();
        let mut dist = vec![UNREACHABLE; n];
        let mut done = vec![false; n];
        dist[rng.offset(seed).unwrap()] = 0;
        let mut nb = Neighbors::new();
        for _ in 0..n {
            let Some(u) = (0..n)
                .filter(|&i| !done[i] && dist[i] != UNREACHABLE)
                .min_by_key(|&i| dist[i])
            else {
                break;
            };
            done[u] = true;
            let up = rng.point_at(u);
            for &vp in nb.within(rng, up, conn) {
                let v = rng.offset(vp).unwrap();
                let c = dist[u] + u64::from(w(up, vp));
                if c < dist[v] {
                    dist[v] = c;
                }
            }
        }
        dist
    }

    fn assert_valid_path(
        engine: &ShortestPathEngine,
        target: Point,
        w: &dyn Fn(Point, Point) -> u32,
        conn: Connectivity,
    ) {
        let path = engine.query_path(target).unwrap();
        assert_eq!(path.first().copied(), engine.seed());
        assert_eq!(path.last().copied(), Some(target));
        let mut total = 0u64;
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.touches(b), "{a} and {b} are not adjacent");
            if conn == Connectivity::Four {
                assert!(!a.is_diagonal_to(b));
            }
            total += u64::from(w(a, b));
        }
        assert_eq!(Some(total), engine.distance(target));
    }

    #[test]
    fn unit_grid_corner_to_corner() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 3, 3), four());
        e.start(Point::new(0, 0), unit()).unwrap();
        assert_eq!(e.run().unwrap(), 9);
        assert_eq!(e.phase(), SearchPhase::Exhausted);
        assert_eq!(e.distance(Point::new(2, 2)), Some(4));
        let path = e.query_path(Point::new(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_valid_path(&e, Point::new(2, 2), &|_: Point, _: Point| 1u32, Connectivity::Four);
    }

    #[test]
    fn eight_connected_uses_diagonals() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 3, 3), SearchConfig::default());
        e.start(Point::new(0, 0), unit()).unwrap();
        e.run().unwrap();
        assert_eq!(e.distance(Point::new(2, 2)), Some(2));
        assert_eq!(e.query_path(Point::new(2, 2)).unwrap().len(), 3);
    }

    #[test]
    fn idle_engine_rejects_operations() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 4, 4), four());
        assert_eq!(e.phase(), SearchPhase::Idle);
        assert_eq!(e.step(), Err(SearchError::NotStarted));
        assert_eq!(
            e.query_path(Point::new(1, 1)),
            Err(SearchError::NotStarted)
        );
        assert_eq!(e.snapshot(), Err(SearchError::NotStarted));
        assert_eq!(e.handle().snapshot(), Err(SearchError::NotStarted));
        assert_eq!(e.seed(), None);
        e.cancel();
        assert_eq!(e.phase(), SearchPhase::Idle);
    }

    #[test]
    fn out_of_bounds_points_are_invalid() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 4, 4), four());
        let bad = Point::new(4, 0);
        assert_eq!(e.start(bad, unit()), Err(SearchError::InvalidNode(bad)));
        assert_eq!(e.phase(), SearchPhase::Idle);

        e.start(Point::new(1, 1), unit()).unwrap();
        assert_eq!(e.query_path(bad), Err(SearchError::InvalidNode(bad)));
        assert_eq!(
            e.run_until_settled(Point::new(-1, 2)),
            Err(SearchError::InvalidNode(Point::new(-1, 2)))
        );
        // A failed restart keeps the running session.
        assert_eq!(e.start(bad, unit()), Err(SearchError::InvalidNode(bad)));
        assert_eq!(e.seed(), Some(Point::new(1, 1)));
    }

    #[test]
    fn frontier_paths_are_provisional() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 5, 1), four());
        e.start(Point::new(0, 0), unit()).unwrap();
        let far = Point::new(3, 0);
        assert_eq!(e.query_path(far), Err(SearchError::NotReached(far)));

        assert_eq!(
            e.step().unwrap(),
            StepOutcome::Settled(PathNode {
                pos: Point::new(0, 0),
                cost: 0
            })
        );
        assert_eq!(e.state(Point::new(1, 0)), NodeState::Frontier);
        assert_eq!(
            e.query_path(Point::new(1, 0)).unwrap(),
            vec![Point::new(0, 0), Point::new(1, 0)]
        );
        assert_eq!(e.query_path(far), Err(SearchError::NotReached(far)));
    }

    #[test]
    fn relaxation_improves_frontier_paths() {
        // Going straight from (0,0) to (2,0) is expensive; detouring through
        // the second row is cheap.
        let expensive = |a: Point, b: Point| -> u32 { if a.y == 0 && b.y == 0 { 10 } else { 1 } };
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 3, 2), four());
        e.start(Point::new(0, 0), Arc::new(expensive)).unwrap();
        e.run_for(2).unwrap();
        let target = Point::new(1, 0);
        // (1,0) was first discovered from the seed at cost 10.
        assert_eq!(e.state(target), NodeState::Frontier);
        assert_eq!(e.distance(target), Some(10));

        e.run_until_settled(target).unwrap();
        assert_eq!(e.distance(target), Some(3));
        assert_eq!(
            e.query_path(target).unwrap(),
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(1, 0)
            ]
        );
    }

    #[test]
    fn matches_reference_dijkstra() {
        for (i, conn) in [Connectivity::Four, Connectivity::Eight]
            .into_iter()
            .enumerate()
        {
            let rng = Range::new(0, 0, 9, 7);
            let weights = random_weights(rng, 11 + i as u64);
            let w = {
                let weights = Arc::clone(&weights);
                move |a: Point, b: Point| weights[&(a, b)]
            };
            let seed = Point::new(4, 3);

            let mut e =
                ShortestPathEngine::new(rng, SearchConfig::default().with_connectivity(conn));
            e.start(seed, Arc::new(w.clone())).unwrap();

            let mut settled_at: HashMap<Point, u64> = HashMap::new();
            let mut last_cost = 0;
            while let StepOutcome::Settled(node) = e.step().unwrap() {
                assert!(node.cost >= last_cost, "settle order must be non-decreasing");
                last_cost = node.cost;
                settled_at.insert(node.pos, node.cost);
                assert_eq!(e.frontier_count(), {
                    e.state.iter().filter(|s| **s == NodeState::Frontier).count()
                });
                for (&p, &d) in &settled_at {
                    assert_eq!(e.distance(p), Some(d), "settled distance changed");
                }
            }

            let expected = reference_distances(rng, conn, seed, &w);
            for p in rng.iter() {
                let want = expected[rng.offset(p).unwrap()];
                assert_eq!(e.distance(p), Some(want), "distance to {p}");
                assert_valid_path(&e, p, &w, conn);
            }
        }
    }

    #[test]
    fn exhausted_is_terminal() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 2, 2), four());
        e.start(Point::new(1, 1), unit()).unwrap();
        assert_eq!(e.run_for(100).unwrap(), 4);
        assert_eq!(e.step(), Ok(StepOutcome::Exhausted));
        assert_eq!(e.step(), Ok(StepOutcome::Exhausted));
        assert_eq!(e.run().unwrap(), 0);
        assert_eq!(e.settled_count(), 4);
        assert_eq!(e.frontier_count(), 0);
        let snap = e.snapshot().unwrap();
        assert_eq!(snap.settled_count(), 4);
        assert_eq!(e.handle().snapshot().unwrap(), snap);
    }

    #[test]
    fn cancel_discards_session() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 6, 6), four());
        e.start(Point::new(0, 0), unit()).unwrap();
        e.run_for(5).unwrap();
        e.cancel();
        assert_eq!(e.phase(), SearchPhase::Cancelled);
        assert_eq!(e.step(), Err(SearchError::Cancelled));
        assert_eq!(
            e.query_path(Point::new(0, 0)),
            Err(SearchError::Cancelled)
        );
        assert_eq!(e.snapshot(), Err(SearchError::Cancelled));
        assert_eq!(e.distance(Point::new(0, 0)), None);
        assert_eq!(e.settled_count(), 0);

        e.start(Point::new(5, 5), unit()).unwrap();
        e.run().unwrap();
        assert_eq!(e.distance(Point::new(0, 0)), Some(10));
    }

    #[test]
    fn handle_cancel_is_observed_by_next_step() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 6, 6), four());
        e.start(Point::new(0, 0), unit()).unwrap();
        let handle = e.handle();
        e.run_for(3).unwrap();

        thread::spawn(move || handle.cancel()).join().unwrap();

        assert_eq!(e.phase(), SearchPhase::Cancelled);
        assert_eq!(e.query_path(Point::new(0, 0)), Err(SearchError::Cancelled));
        assert_eq!(e.step(), Err(SearchError::Cancelled));
        assert_eq!(e.settled_count(), 0);
        assert!(e.handle().is_cancelled());
    }

    #[test]
    fn restart_cancels_previous_handles() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 4, 4), four());
        e.start(Point::new(0, 0), unit()).unwrap();
        let old = e.handle();
        e.run_for(4).unwrap();

        e.start(Point::new(3, 3), unit()).unwrap();
        assert!(old.is_cancelled());
        assert_eq!(old.snapshot(), Err(SearchError::Cancelled));

        let fresh = e.handle().snapshot().unwrap();
        assert_eq!(fresh.settled_count(), 0);
        assert_eq!(fresh.frontier_count(), 1);
        assert!(fresh.discovered(Point::new(3, 3)));
    }

    #[test]
    fn handle_from_idle_engine_is_retired_by_start() {
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 4, 4), four());
        let early = e.handle();
        assert_eq!(early.snapshot(), Err(SearchError::NotStarted));
        assert!(!early.is_cancelled());

        e.start(Point::new(0, 0), unit()).unwrap();
        assert!(early.is_cancelled());
        assert_eq!(early.snapshot(), Err(SearchError::Cancelled));
        // Cancelling through the retired handle leaves the new session alone.
        early.cancel();
        assert_eq!(e.phase(), SearchPhase::Running);
        assert_eq!(e.handle().snapshot().unwrap().frontier_count(), 1);
    }

    #[test]
    fn handle_snapshots_trail_by_publish_interval() {
        let config = four().with_publish_interval(4);
        let mut e = ShortestPathEngine::new(Range::new(0, 0, 8, 8), config);
        e.start(Point::new(0, 0), unit()).unwrap();
        let handle = e.handle();

        for _ in 0..3 {
            e.step().unwrap();
        }
        assert_eq!(handle.snapshot().unwrap().settled_count(), 0);
        assert_eq!(e.snapshot().unwrap().settled_count(), 3);
        e.step().unwrap();
        assert_eq!(handle.snapshot().unwrap().settled_count(), 4);

        e.run_for(2).unwrap();
        assert_eq!(handle.snapshot().unwrap(), e.snapshot().unwrap());
    }

    #[test]
    fn concurrent_snapshots_are_consistent() {
        let rng = Range::new(0, 0, 64, 64);
        let config = four().with_publish_interval(1);
        let seed = Point::new(32, 32);
        let mut e = ShortestPathEngine::new(rng, config);
        e.start(seed, unit()).unwrap();
        let handle = e.handle();

        let reader = thread::spawn(move || {
            let mut last_settled = 0;
            let mut taken = 0;
            loop {
                let snap = handle.snapshot().unwrap();
                assert!(snap.settled_count() >= last_settled);
                last_settled = snap.settled_count();
                // Every frontier node was discovered from a settled neighbour.
                for p in rng.iter() {
                    if p != seed && snap.discovered(p) && !snap.settled(p) {
                        assert!(p.neighbors_4().iter().any(|&n| snap.settled(n)));
                    }
                }
                taken += 1;
                if last_settled == rng.len() {
                    return taken;
                }
                thread::yield_now();
            }
        });

        e.run().unwrap();
        assert!(reader.join().unwrap() >= 1);
    }
}
