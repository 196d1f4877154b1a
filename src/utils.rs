use ultraviolet::DVec2;

use crate::body::{Body, ShapeKind};

/// Source of uniform randomness used when spawning bodies and picking accelerations.
///
/// Production code uses [`fastrand::Rng`]; tests can plug in a scripted sequence
/// to get exact, repeatable output.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `[low, high)`. Returns `low` when the range is empty.
    fn range(&mut self, low: i32, high: i32) -> i32;
}

impl RandomSource for fastrand::Rng {
    fn unit(&mut self) -> f64 {
        self.f64()
    }

    fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.i32(low..high)
    }
}

/// Seeded generator, or an entropy-seeded one when `seed` is `None`.
pub fn rng_from_seed(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

/// Integer spawn point inside a `width` x `height` viewport, keeping `margin` clear on every side.
pub fn spawn_position(rng: &mut impl RandomSource, width: u32, height: u32, margin: u32) -> DVec2 {
    let margin = margin.min(i32::MAX as u32) as i32;
    let width = width.min(i32::MAX as u32) as i32;
    let height = height.min(i32::MAX as u32) as i32;

    let x = rng.range(margin, width.saturating_sub(margin));
    let y = rng.range(margin, height.saturating_sub(margin));
    DVec2::new(x as f64, y as f64)
}

/// Generates `n` randomized bodies of one shape scattered over the viewport.
pub fn scatter(
    rng: &mut impl RandomSource,
    n: usize,
    shape: ShapeKind,
    width: u32,
    height: u32,
    margin: u32,
) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(n);
    while bodies.len() < n {
        let pos = spawn_position(rng, width, height, margin);
        bodies.push(Body::random(pos, shape, rng));
    }
    bodies
}
