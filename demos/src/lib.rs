//! Shared pieces of the scissors demos: a synthetic test image and a text
//! renderer for search progress.

use rand::{RngExt, SeedableRng};
use scissors_core::{Color, PixelGrid, Point};
use scissors_paths::ProgressSnapshot;

/// A noisy dark background with a bright disc in the middle, so the disc's
/// rim is the obvious boundary to trace.
pub fn disc_image(width: i32, height: i32, seed: u64) -> PixelGrid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let center = Point::new(width / 2, height / 2);
    let radius = width.min(height) / 3;
    PixelGrid::from_fn(width, height, |p| {
        let d = p - center;
        let noise = rng.random_range(0..24u8);
        if d.x * d.x + d.y * d.y <= radius * radius {
            Color::gray(200 + noise)
        } else {
            Color::gray(20 + noise)
        }
    })
}

/// Render `snapshot` as text: `#` settled, `+` frontier, `o` on `path`,
/// `.` undiscovered.
pub fn render(snapshot: &ProgressSnapshot, path: &[Point]) -> String {
    let rng = snapshot.range();
    let mut out = String::with_capacity(rng.len() + rng.height().max(0) as usize);
    for y in rng.min.y..rng.max.y {
        for x in rng.min.x..rng.max.x {
            let p = Point::new(x, y);
            let ch = if path.contains(&p) {
                'o'
            } else if snapshot.settled(p) {
                '#'
            } else if snapshot.discovered(p) {
                '+'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
