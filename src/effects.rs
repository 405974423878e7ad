//! Explosion and particle effects: constructors and per-variant animation.
//!
//! Each variant carries its own counter and expires once that counter passes
//! a fixed threshold.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{Effect, Explosion, Flash, Particle, PowerRing, PowerUpKind};
use crate::utils::random_between;

pub const EXPLOSION_FRAMES: f32 = 30.0;
pub const FLASH_FRAMES: u32 = 20;
pub const PARTICLE_LIFE: u32 = 40;
pub const RING_FRAMES: u32 = 30;

const HAZARD_PARTICLES: usize = 8;
const ENEMY_PARTICLES: usize = 10;
const PARTICLE_DRAG: f32 = 0.95;

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn explosion(x: f32, y: f32, size: f32) -> Effect {
    Effect::Explosion(Explosion {
        x,
        y,
        size,
        frame: 0.0,
        death: false,
    })
}

/// One member of the player-death burst.
pub fn death_explosion(x: f32, y: f32, size: f32, frame: f32) -> Effect {
    Effect::Explosion(Explosion {
        x,
        y,
        size,
        frame,
        death: true,
    })
}

fn particles(
    count: usize,
    x: f32,
    y: f32,
    max_speed: f32,
    size: f32,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32 + random_between(rng, -0.3, 0.3);
            let speed = random_between(rng, max_speed * 0.4, max_speed);
            Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                size,
                life: 0,
            }
        })
        .collect()
}

/// Ring plus debris for a destroyed hazard.
pub fn hazard_burst(effects: &mut Vec<Effect>, x: f32, y: f32, size: f32, rng: &mut impl Rng) {
    effects.push(Effect::HazardHit(Flash { x, y, size, frame: 0 }));
    effects.extend(
        particles(HAZARD_PARTICLES, x, y, size / 8.0, size / 10.0, rng)
            .into_iter()
            .map(Effect::HazardParticle),
    );
}

/// Impact flash at the bullet, a larger one at the enemy, then debris.
pub fn enemy_burst(
    effects: &mut Vec<Effect>,
    impact: (f32, f32),
    x: f32,
    y: f32,
    size: f32,
    rng: &mut impl Rng,
) {
    effects.push(Effect::EnemyHit(Flash {
        x: impact.0,
        y: impact.1,
        size: size * 0.75,
        frame: 0,
    }));
    effects.push(Effect::EnemyHit(Flash { x, y, size: size * 1.5, frame: 0 }));
    effects.extend(
        particles(ENEMY_PARTICLES, x, y, size / 6.0, size / 12.0, rng)
            .into_iter()
            .map(Effect::EnemyParticle),
    );
}

pub fn power_ring(x: f32, y: f32, kind: PowerUpKind, scale: f32) -> Effect {
    Effect::PowerRing(PowerRing {
        x,
        y,
        radius: 10.0 * scale,
        growth: 3.0 * scale,
        kind,
        frame: 0,
    })
}

// ── Animation ─────────────────────────────────────────────────────────────────

fn advance_particle(p: &mut Particle) {
    p.x += p.vx;
    p.y += p.vy;
    p.vx *= PARTICLE_DRAG;
    p.vy *= PARTICLE_DRAG;
    p.life += 1;
}

/// Step one effect.  Returns `false` once it has expired.
pub fn advance(effect: &mut Effect) -> bool {
    match effect {
        Effect::Explosion(e) => {
            e.frame += 1.0;
            e.frame <= EXPLOSION_FRAMES
        }
        Effect::HazardHit(f) | Effect::EnemyHit(f) => {
            f.frame += 1;
            f.frame <= FLASH_FRAMES
        }
        Effect::HazardParticle(p) | Effect::EnemyParticle(p) => {
            advance_particle(p);
            p.life <= PARTICLE_LIFE
        }
        Effect::PowerRing(r) => {
            r.radius += r.growth;
            r.frame += 1;
            r.frame <= RING_FRAMES
        }
    }
}

/// Step every effect, removing expired ones in the same pass.
pub fn advance_effects(effects: &mut Vec<Effect>) {
    for i in (0..effects.len()).rev() {
        if !advance(&mut effects[i]) {
            effects.remove(i);
        }
    }
}
