use scissors_core::{Point, Range};

use crate::config::Connectivity;

/// Cached neighbour computation helper.
///
/// Enumerates the cardinal (4-way) or all (8-way) neighbours of a pixel
/// that fall inside a range, reusing one buffer.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// In-range neighbours of `p` under `connectivity`.
    pub fn within(&mut self, rng: Range, p: Point, connectivity: Connectivity) -> &[Point] {
        self.buf.clear();
        match connectivity {
            Connectivity::Four => self
                .buf
                .extend(p.neighbors_4().into_iter().filter(|&n| rng.contains(n))),
            Connectivity::Eight => self
                .buf
                .extend(p.neighbors_8().into_iter().filter(|&n| rng.contains(n))),
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_neighbors_are_clipped() {
        let rng = Range::new(0, 0, 3, 3);
        let mut nb = Neighbors::new();
        assert_eq!(nb.within(rng, Point::new(0, 0), Connectivity::Four).len(), 2);
        assert_eq!(nb.within(rng, Point::new(0, 0), Connectivity::Eight).len(), 3);
        assert_eq!(nb.within(rng, Point::new(1, 1), Connectivity::Four).len(), 4);
        assert_eq!(nb.within(rng, Point::new(1, 1), Connectivity::Eight).len(), 8);
    }

    #[test]
    fn neighbors_touch_their_center() {
        let rng = Range::new(-2, -2, 2, 2);
        let mut nb = Neighbors::new();
        let p = Point::new(-1, 0);
        for &n in nb.within(rng, p, Connectivity::Eight) {
            assert!(p.touches(n));
            assert!(rng.contains(n));
        }
    }
}
