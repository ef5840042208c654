//! Interactive boundary tracing built on the shortest-path engine.
//!
//! A [`Tracer`] models a selection made of control points joined by
//! minimum-cost paths. While the user moves the pointer, [`Tracer::live_wire`]
//! previews the path from the last control point; clicking commits it with
//! [`Tracer::append`], which also restarts the search from the new point.
//! Once the outline is closed, [`Tracer::move_point`] drags a control point
//! and re-routes the two segments that meet there.
//!
//! Searches over large images can take a while. Another thread can stop the
//! one in progress through [`Tracer::handle`]; the interrupted call returns
//! [`SearchError::Cancelled`] and the selection itself is unchanged.

use std::fmt;
use std::sync::Arc;

use scissors_core::{Point, Range};

use crate::config::SearchConfig;
use crate::engine::{SearchHandle, ShortestPathEngine};
use crate::error::SearchError;
use crate::snapshot::ProgressSnapshot;
use crate::traits::EdgeWeight;

/// Where a selection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionState {
    /// No start point yet.
    NoSelection,
    /// Start point set; segments may be appended.
    Selecting,
    /// The outline has been closed back to the start point.
    Selected,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoSelection => "no selection",
            Self::Selecting => "selecting",
            Self::Selected => "selected",
        })
    }
}

/// Errors from [`Tracer`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// The operation is not allowed in the current state.
    InvalidState {
        op: &'static str,
        state: SelectionState,
    },
    /// No control point has this index.
    InvalidIndex { index: usize, len: usize },
    /// The underlying search failed.
    Search(SearchError),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { op, state } => write!(f, "cannot {op} while {state}"),
            Self::InvalidIndex { index, len } => {
                write!(f, "control point {index} out of range (selection has {len})")
            }
            Self::Search(e) => write!(f, "search failed: {e}"),
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::InvalidState { .. } | Self::InvalidIndex { .. } => None,
        }
    }
}

impl From<SearchError> for SelectionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// A chain of adjacent pixels. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolyLine {
    points: Vec<Point>,
}

impl PolyLine {
    fn from_path(points: Vec<Point>) -> Option<Self> {
        (!points.is_empty()).then_some(Self { points })
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Selection model that connects control points with minimum-cost paths.
pub struct Tracer {
    engine: ShortestPathEngine,
    weight: Arc<dyn EdgeWeight>,
    start: Option<Point>,
    segments: Vec<PolyLine>,
    state: SelectionState,
}

impl Tracer {
    pub fn new(rng: Range, config: SearchConfig, weight: Arc<dyn EdgeWeight>) -> Self {
        Self {
            engine: ShortestPathEngine::new(rng, config),
            weight,
            start: None,
            segments: Vec::new(),
            state: SelectionState::NoSelection,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Committed segments, in order.
    pub fn segments(&self) -> &[PolyLine] {
        &self.segments
    }

    /// The first control point.
    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    /// Where the next segment would begin.
    pub fn last_point(&self) -> Option<Point> {
        self.segments.last().map(PolyLine::end).or(self.start)
    }

    /// Progress of the search from the last control point.
    pub fn progress(&self) -> Result<ProgressSnapshot, SearchError> {
        self.engine.snapshot()
    }

    /// Handle for cancelling the current search from another thread.
    ///
    /// Every restart of the search (a new control point, undo, recovery
    /// from a cancel) retires older handles, so fetch one per operation.
    pub fn handle(&self) -> SearchHandle {
        self.engine.handle()
    }

    /// Set the first control point.
    pub fn start_at(&mut self, p: Point) -> Result<(), SelectionError> {
        self.require(SelectionState::NoSelection, "start a selection")?;
        self.engine.start(p, Arc::clone(&self.weight))?;
        self.start = Some(p);
        self.state = SelectionState::Selecting;
        Ok(())
    }

    /// The minimum-cost path from the last control point to `p`.
    pub fn live_wire(&mut self, p: Point) -> Result<PolyLine, SelectionError> {
        self.require(SelectionState::Selecting, "preview a segment")?;
        if let Err(e) = self.engine.run_until_settled(p) {
            if e == SearchError::Cancelled {
                // Consume the cancel; the next preview searches afresh.
                self.restart_from_last()?;
            }
            return Err(e.into());
        }
        let path = self.engine.query_path(p)?;
        PolyLine::from_path(path).ok_or(SelectionError::Search(SearchError::NotReached(p)))
    }

    /// Commit the live wire to `p` and continue tracing from `p`.
    pub fn append(&mut self, p: Point) -> Result<(), SelectionError> {
        let segment = self.live_wire(p)?;
        self.segments.push(segment);
        self.engine.start(p, Arc::clone(&self.weight))?;
        Ok(())
    }

    /// Close the outline back to the start point.
    ///
    /// A selection without segments cannot enclose anything and is reset
    /// instead.
    pub fn finish(&mut self) -> Result<(), SelectionError> {
        self.require(SelectionState::Selecting, "finish")?;
        let Some(start) = self.start else {
            return Err(SelectionError::InvalidState {
                op: "finish",
                state: self.state,
            });
        };
        if self.segments.is_empty() {
            self.reset();
            return Ok(());
        }
        let closing = self.live_wire(start)?;
        self.segments.push(closing);
        self.engine.cancel();
        self.state = SelectionState::Selected;
        log::debug!("selection closed with {} segments", self.segments.len());
        Ok(())
    }

    /// Move control point `index` of a closed outline to `p`.
    ///
    /// Control point `i` is where segment `i` starts; point 0 is the start
    /// point, so moving it also re-routes the last segment. Both affected
    /// segments are replaced by minimum-cost paths through `p`. On error the
    /// selection is left as it was.
    pub fn move_point(&mut self, index: usize, p: Point) -> Result<(), SelectionError> {
        self.require(SelectionState::Selected, "move a control point")?;
        let len = self.segments.len();
        if index >= len {
            return Err(SelectionError::InvalidIndex { index, len });
        }
        let prev = (index + len - 1) % len;
        let from = self.segments[prev].start();
        let to = self.segments[index].end();
        let routed = self.route(from, p).and_then(|incoming| {
            let outgoing = self.route(p, to)?;
            Ok((incoming, outgoing))
        });
        // Selected outlines keep no search running.
        self.engine.cancel();
        let (incoming, outgoing) = routed?;
        self.segments[prev] = incoming;
        self.segments[index] = outgoing;
        if index == 0 {
            self.start = Some(p);
        }
        log::debug!("moved control point {index} to {p}");
        Ok(())
    }

    /// Remove the most recent segment, or the start point if there are no
    /// segments.
    pub fn undo(&mut self) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::NoSelection => Ok(()),
            SelectionState::Selecting if self.segments.is_empty() => {
                self.reset();
                Ok(())
            }
            SelectionState::Selecting | SelectionState::Selected => {
                self.segments.pop();
                self.state = SelectionState::Selecting;
                match self.last_point() {
                    Some(p) => Ok(self.engine.start(p, Arc::clone(&self.weight))?),
                    None => {
                        self.reset();
                        Ok(())
                    }
                }
            }
        }
    }

    /// Discard the whole selection.
    pub fn reset(&mut self) {
        self.engine.cancel();
        self.start = None;
        self.segments.clear();
        self.state = SelectionState::NoSelection;
    }

    /// Minimum-cost path from `from` to `to` with a dedicated search.
    fn route(&mut self, from: Point, to: Point) -> Result<PolyLine, SelectionError> {
        self.engine.start(from, Arc::clone(&self.weight))?;
        self.engine.run_until_settled(to)?;
        let path = self.engine.query_path(to)?;
        PolyLine::from_path(path).ok_or(SelectionError::Search(SearchError::NotReached(to)))
    }

    fn restart_from_last(&mut self) -> Result<(), SelectionError> {
        if let Some(p) = self.last_point() {
            log::debug!("search cancelled, restarting from {p}");
            self.engine.start(p, Arc::clone(&self.weight))?;
        }
        Ok(())
    }

    fn require(&self, state: SelectionState, op: &'static str) -> Result<(), SelectionError> {
        if self.state == state {
            Ok(())
        } else {
            Err(SelectionError::InvalidState {
                op,
                state: self.state,
            })
        }
    }
}
