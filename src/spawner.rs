//! Entity creation: enemy waves, power-ups, hazards and the starfield.
//!
//! Recurring spawns are tick-counted; the next interval is drawn here and
//! counted down by the update engine, never scheduled against wall time.

use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::entities::{Enemy, EnemyKind, GameState, Hazard, PowerUp, PowerUpKind, Sparkle, Star};
use crate::scaling::{Metrics, Viewport};
use crate::utils::{random_angle, random_between, random_ticks};

/// A wave is always this many enemies.
pub const WAVE_SIZE: usize = 3;

const SPARKLES_PER_POWER_UP: usize = 5;

/// Replace the whole wave with a fresh, evenly spaced one.
pub fn spawn_wave(state: &mut GameState, shoot_interval: &Range<u32>, rng: &mut impl Rng) {
    state.enemies.clear();
    for _ in 0..WAVE_SIZE {
        let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
        state.enemies.push(Enemy {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            kind,
            shoot_timer: random_ticks(rng, shoot_interval),
        });
    }
    layout_wave(&mut state.enemies, &state.viewport, &state.metrics);
    debug!(frame = state.frame, "enemy wave spawned");
}

/// Centre the formation on the viewport at the current scale.
///
/// Spacing shrinks on narrow viewports so the wave spans at most 80% of the
/// width and always has room to bounce.
pub fn layout_wave(enemies: &mut [Enemy], viewport: &Viewport, metrics: &Metrics) {
    let gaps = enemies.len().saturating_sub(1) as f32;
    let spacing = if gaps > 0.0 {
        let fit = ((0.8 * viewport.width - metrics.enemy_size) / gaps).max(0.0);
        metrics.enemy_spacing.min(fit)
    } else {
        0.0
    };
    let first_x = viewport.width / 2.0 - spacing * gaps / 2.0;
    for (i, e) in enemies.iter_mut().enumerate() {
        e.x = first_x + i as f32 * spacing;
        e.y = metrics.enemy_row_y;
        e.size = metrics.enemy_size;
    }
}

/// A power-up of a uniformly chosen kind, just above the top edge.
pub fn spawn_power_up(viewport: &Viewport, metrics: &Metrics, rng: &mut impl Rng) -> PowerUp {
    let size = metrics.power_up_size;
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    let particles = (0..SPARKLES_PER_POWER_UP)
        .map(|_| Sparkle {
            angle: random_angle(rng),
            distance: random_between(rng, size * 0.6, size),
            speed: random_between(rng, 0.03, 0.08),
        })
        .collect();

    PowerUp {
        kind,
        x: random_between(rng, size, viewport.width - size),
        y: -size,
        size,
        fall_speed: random_between(rng, metrics.power_up_speed.start, metrics.power_up_speed.end),
        rotation: random_angle(rng),
        pulse_phase: random_angle(rng),
        particles,
    }
}

/// A hazard of random size and fall speed, just above the top edge.
pub fn spawn_hazard(viewport: &Viewport, metrics: &Metrics, rng: &mut impl Rng) -> Hazard {
    let size = random_between(rng, metrics.hazard_size.start, metrics.hazard_size.end);
    Hazard {
        id: rng.gen(),
        x: random_between(rng, size / 2.0, viewport.width - size / 2.0),
        y: -size,
        size,
        vy: random_between(rng, metrics.hazard_speed.start, metrics.hazard_speed.end),
        pulse_phase: random_angle(rng),
    }
}

pub fn spawn_star(viewport: &Viewport, metrics: &Metrics, rng: &mut impl Rng) -> Star {
    Star {
        x: random_between(rng, 0.0, viewport.width),
        y: random_between(rng, 0.0, viewport.height),
        speed: random_between(rng, metrics.star_speed.start, metrics.star_speed.end),
        size: random_between(rng, metrics.star_size.start, metrics.star_size.end),
    }
}

pub fn spawn_stars(
    count: usize,
    viewport: &Viewport,
    metrics: &Metrics,
    rng: &mut impl Rng,
) -> Vec<Star> {
    (0..count).map(|_| spawn_star(viewport, metrics, rng)).collect()
}

/// Draw the next recurring-spawn interval.
pub fn next_interval(range: &Range<u32>, rng: &mut impl Rng) -> u32 {
    random_ticks(rng, range)
}
