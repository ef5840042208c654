//! **scissors-core** — core types for intelligent-scissors boundary tracing.
//!
//! This crate provides the foundational types shared by the search engine and
//! its callers: pixel geometry and the colour image a search runs over.

pub mod color;
pub mod geom;
pub mod image;

pub use color::Color;
pub use geom::{Point, Range, RangeIter};
pub use image::PixelGrid;
