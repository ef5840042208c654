//! An owned pixel buffer addressed by [`Point`].
//!
//! [`PixelGrid`] is the image a boundary search runs over. It only stores
//! colours; cost evaluation lives with the edge-weight functions that read
//! from it.

use crate::color::Color;
use crate::geom::{Point, Range};

/// A `width x height` grid of [`Color`] values in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Create a black image. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width as usize) * (height as usize)],
        }
    }

    /// Create an image by evaluating `f` at every pixel.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> Color) -> Self {
        let mut grid = Self::new(width, height);
        for (i, p) in grid.bounds().iter().enumerate() {
            grid.pixels[i] = f(p);
        }
        grid
    }

    /// Wrap an existing row-major buffer. Returns `None` if its length does
    /// not match `width * height`.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The range of valid pixel coordinates.
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Whether `p` addresses a pixel of this image.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Get the pixel at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Color> {
        self.bounds().offset(p).map(|i| self.pixels[i])
    }

    /// Brightness of the pixel at `p`, or `None` if out of bounds.
    pub fn luma(&self, p: Point) -> Option<u8> {
        self.at(p).map(Color::luma)
    }

    /// Set the pixel at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, c: Color) {
        if let Some(i) = self.bounds().offset(p) {
            self.pixels[i] = c;
        }
    }

    /// The raw row-major buffer.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_size() {
        let g = PixelGrid::new(10, 5);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 5);
        assert_eq!(g.bounds(), Range::new(0, 0, 10, 5));
        assert_eq!(g.pixels().len(), 50);
    }

    #[test]
    fn set_and_at() {
        let mut g = PixelGrid::new(4, 4);
        let p = Point::new(2, 3);
        g.set(p, Color::gray(42));
        assert_eq!(g.at(p), Some(Color::gray(42)));
        assert_eq!(g.luma(p), Some(42));
        assert_eq!(g.at(Point::new(0, 0)), Some(Color::BLACK));
        assert_eq!(g.at(Point::new(10, 10)), None);
        g.set(Point::new(-1, 0), Color::WHITE);
        assert!(g.pixels().iter().all(|&c| c != Color::WHITE));
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = PixelGrid::from_fn(3, 2, |p| Color::gray((p.y * 3 + p.x) as u8));
        let values: Vec<u8> = g.pixels().iter().map(|c| c.luma()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(PixelGrid::from_pixels(2, 2, vec![Color::BLACK; 4]).is_some());
        assert!(PixelGrid::from_pixels(2, 2, vec![Color::BLACK; 3]).is_none());
        assert!(PixelGrid::from_pixels(-1, 2, Vec::new()).is_none());
    }
}
