//! Running a search on a worker thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use scissors_core::{Point, Range};

use crate::config::SearchConfig;
use crate::engine::{SearchHandle, ShortestPathEngine};
use crate::error::SearchError;
use crate::paths::ShortestPaths;
use crate::snapshot::ProgressSnapshot;
use crate::traits::EdgeWeight;

/// A search running to exhaustion on its own thread.
///
/// The owning thread stays responsive: it can poll [`progress`](Self::progress)
/// for rendering, [`cancel`](Self::cancel) at any time, and
/// [`join`](Self::join) for the finished shortest-path tree.
#[derive(Debug)]
pub struct BackgroundSearch {
    handle: SearchHandle,
    seed: Point,
    worker: JoinHandle<Result<ShortestPaths, SearchError>>,
}

impl BackgroundSearch {
    /// Start searching from `seed` on a new thread.
    pub fn spawn(
        rng: Range,
        config: SearchConfig,
        seed: Point,
        weight: Arc<dyn EdgeWeight>,
    ) -> Result<Self, SearchError> {
        let mut engine = ShortestPathEngine::new(rng, config);
        engine.start(seed, weight)?;
        let handle = engine.handle();
        log::debug!("spawning background search from {seed}");
        let worker = thread::spawn(move || {
            let result = engine.finish();
            match &result {
                Ok(paths) => {
                    log::debug!("background search from {seed} reached {} nodes", paths.len())
                }
                Err(e) => log::debug!("background search from {seed} stopped: {e}"),
            }
            result
        });
        Ok(Self {
            handle,
            seed,
            worker,
        })
    }

    pub fn seed(&self) -> Point {
        self.seed
    }

    /// Latest published progress.
    pub fn progress(&self) -> Result<ProgressSnapshot, SearchError> {
        self.handle.snapshot()
    }

    /// Ask the worker to stop; [`join`](Self::join) then reports
    /// [`SearchError::Cancelled`].
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// A handle for cancelling or observing the search from elsewhere.
    pub fn handle(&self) -> SearchHandle {
        self.handle.clone()
    }

    /// Wait for the worker and return its result.
    pub fn join(self) -> Result<ShortestPaths, SearchError> {
        match self.worker.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}
