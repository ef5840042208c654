//! Incremental shortest-path search for intelligent-scissors boundary tracing.
//!
//! This crate provides the search core behind an "intelligent scissors"
//! selection tool:
//!
//! - [`IndexedPriorityQueue`]: a binary min-heap over distinct keys whose
//!   priorities can be raised or lowered in place.
//! - [`ShortestPathEngine`]: Dijkstra's algorithm over the pixels of an
//!   image, advanced one settled node at a time so that it stays cancellable
//!   and can report progress while it runs.
//! - [`ProgressSnapshot`]: an immutable settled / frontier classification
//!   for rendering search progress.
//! - [`BackgroundSearch`] and [`Tracer`]: a worker-thread runner and a
//!   selection model built on the engine.
//!
//! Edge costs come from an [`EdgeWeight`]; [`weight_by_name`] builds the
//! built-in ones.
//!
//! # Threading
//!
//! | Call | Thread |
//! |---|---|
//! | [`ShortestPathEngine::step`] and friends | the engine's owner, one at a time |
//! | [`SearchHandle::snapshot`], [`SearchHandle::cancel`] | any |

mod background;
mod config;
mod engine;
mod error;
mod neighbors;
mod paths;
mod queue;
mod snapshot;
mod tracer;
mod traits;
mod weight;

pub use background::BackgroundSearch;
pub use config::{Connectivity, SearchConfig};
pub use engine::{SearchHandle, SearchPhase, ShortestPathEngine, StepOutcome};
pub use error::SearchError;
pub use neighbors::Neighbors;
pub use paths::{PathNode, ShortestPaths, UNREACHABLE};
pub use queue::{EmptyQueueError, IndexedPriorityQueue};
pub use snapshot::{NodeState, ProgressSnapshot};
pub use tracer::{PolyLine, SelectionError, SelectionState, Tracer};
pub use traits::EdgeWeight;
pub use weight::{ContrastWeight, UniformWeight, WEIGHT_NAMES, WeightError, weight_by_name};
