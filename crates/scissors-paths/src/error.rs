use std::fmt;

use scissors_core::Point;

/// Errors reported by the search engine and everything built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The point lies outside the searched range.
    InvalidNode(Point),
    /// The point has not been discovered by the search (yet).
    NotReached(Point),
    /// The session was cancelled; a new one must be started.
    Cancelled,
    /// No session has been started.
    NotStarted,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode(p) => write!(f, "point {p} is outside the search range"),
            Self::NotReached(p) => write!(f, "point {p} has not been reached by the search"),
            Self::Cancelled => f.write_str("search was cancelled"),
            Self::NotStarted => f.write_str("no search has been started"),
        }
    }
}

impl std::error::Error for SearchError {}
