//! Built-in edge weights and lookup by name.
//!
//! Callers can supply any [`EdgeWeight`]; the weights here cover the common
//! cases and give user interfaces a fixed list of names to offer.

use std::fmt;
use std::sync::Arc;

use scissors_core::{PixelGrid, Point, Range};

use crate::traits::EdgeWeight;

/// Names accepted by [`weight_by_name`].
pub const WEIGHT_NAMES: &[&str] = &["uniform", "contrast"];

/// Error returned by [`weight_by_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    /// No weight is registered under this name.
    Unknown(String),
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(
                f,
                "unknown edge weight \u{201c}{name}\u{201d} (expected one of: {})",
                WEIGHT_NAMES.join(", ")
            ),
        }
    }
}

impl std::error::Error for WeightError {}

/// Build the weight registered as `name` for `image`.
pub fn weight_by_name(name: &str, image: &PixelGrid) -> Result<Arc<dyn EdgeWeight>, WeightError> {
    match name {
        "uniform" => Ok(Arc::new(UniformWeight::new(1))),
        "contrast" => Ok(Arc::new(ContrastWeight::new(image))),
        other => Err(WeightError::Unknown(other.to_string())),
    }
}

/// Every step costs the same, with an optional separate diagonal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformWeight {
    cardinal: u32,
    diagonal: u32,
}

impl UniformWeight {
    pub const fn new(cost: u32) -> Self {
        Self {
            cardinal: cost,
            diagonal: cost,
        }
    }

    pub const fn with_diagonal(cardinal: u32, diagonal: u32) -> Self {
        Self { cardinal, diagonal }
    }
}

impl EdgeWeight for UniformWeight {
    #[inline]
    fn weight(&self, from: Point, to: Point) -> u32 {
        if from.is_diagonal_to(to) {
            self.diagonal
        } else {
            self.cardinal
        }
    }
}

/// Cheap to step onto pixels that sit on a strong brightness edge.
///
/// Each pixel's contrast is the largest brightness difference to one of its
/// cardinal neighbours. Stepping onto a pixel costs `base + 255 - contrast`,
/// so minimum-cost paths hug boundaries between light and dark regions.
#[derive(Debug, Clone)]
pub struct ContrastWeight {
    bounds: Range,
    contrast: Vec<u8>,
    base: u32,
}

impl ContrastWeight {
    /// Precompute the contrast map of `image` with a base cost of 1.
    pub fn new(image: &PixelGrid) -> Self {
        Self::with_base(image, 1)
    }

    /// Precompute the contrast map of `image`. `base` is added to every
    /// step so that even perfect edges keep paths short.
    pub fn with_base(image: &PixelGrid, base: u32) -> Self {
        let bounds = image.bounds();
        let contrast = bounds
            .iter()
            .map(|p| {
                let here = image.luma(p).unwrap_or(0);
                p.neighbors_4()
                    .into_iter()
                    .filter_map(|n| image.luma(n))
                    .map(|l| here.abs_diff(l))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        Self {
            bounds,
            contrast,
            base,
        }
    }

    /// Contrast at `p`; zero outside the image.
    pub fn contrast(&self, p: Point) -> u8 {
        self.bounds.offset(p).map_or(0, |i| self.contrast[i])
    }
}

impl EdgeWeight for ContrastWeight {
    #[inline]
    fn weight(&self, _from: Point, to: Point) -> u32 {
        self.base + u32::from(u8::MAX - self.contrast(to))
    }
}
