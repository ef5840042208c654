use scissors_core::Point;

/// Cost of stepping between two adjacent pixels.
///
/// Implementations must be pure: the same pair always yields the same cost.
/// They are shared with worker threads, hence `Send + Sync`.
pub trait EdgeWeight: Send + Sync {
    /// Non-negative cost of moving from `from` to the adjacent `to`.
    fn weight(&self, from: Point, to: Point) -> u32;
}

impl<F> EdgeWeight for F
where
    F: Fn(Point, Point) -> u32 + Send + Sync,
{
    #[inline]
    fn weight(&self, from: Point, to: Point) -> u32 {
        self(from, to)
    }
}
