//! Small numeric helpers shared by the spawner and the update engine.
//!
//! Every random draw goes through these functions with an injected `Rng`, so a
//! seeded generator reproduces a whole run.

use std::f32::consts::TAU;
use std::ops::Range;

use rand::Rng;

/// Uniform draw from `[lo, hi)`.  Collapsed or inverted ranges return `lo`
/// instead of panicking, which happens on tiny viewports.
pub fn random_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Uniform tick count from a half-open range, never below 1.
pub fn random_ticks(rng: &mut impl Rng, range: &Range<u32>) -> u32 {
    let n = if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    };
    n.max(1)
}

/// Random phase in `[0, TAU)`.
pub fn random_angle(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..TAU)
}

/// Clamp `v` into `[lo, hi]`; when the bounds cross, the midpoint wins.
pub fn constrain(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        v.clamp(lo, hi)
    }
}

/// Sine oscillation driven by the frame counter plus a per-entity phase.
pub fn oscillate(frame: u64, rate: f32, phase: f32, amplitude: f32) -> f32 {
    // Wrap the frame first so long sessions keep f32 precision.
    let t = (frame % 1_000_000) as f32;
    (t * rate + phase).sin() * amplitude
}
