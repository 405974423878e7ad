//! The update engine.
//!
//! [`tick`] advances the whole simulation by one fixed step.  Every
//! function here mutates the `GameState` it is given and takes randomness
//! only from the injected `Rng`, so a seeded generator replays a run exactly.
//!
//! Per-tick order while playing:
//!
//! 0. apply input intents (movement, firing, cooldowns)
//! 1. decay power-up timers
//! 2. count down the power-up and hazard spawners
//! 3. hazards: sway, fall, hit the player
//! 4. power-ups: fall, wobble, get collected
//! 5. move and cull bullets
//! 6. enemy formation drift and enemy fire
//! 7. player bullets against hazards, then enemies
//! 8. enemy bullets against the player
//! 9. respawn an empty wave
//! 10. advance visual effects (every phase)

use rand::Rng;
use tracing::debug;

use crate::collision::{circle_rect_overlap, rect_overlap};
use crate::config::GameConfig;
use crate::effects;
use crate::entities::{ActivePowerUps, Bullet, GamePhase, GameState, Player, PowerUpKind};
use crate::input::Intents;
use crate::phase::{self, Transition};
use crate::scaling::{Metrics, Viewport};
use crate::spawner;
use crate::utils::{constrain, oscillate, random_between};

pub const ENEMY_KILL_SCORE: u32 = 10;
pub const HAZARD_KILL_SCORE: u32 = 15;
pub const POWER_UP_SCORE: u32 = 5;

const HAZARD_SWAY_RATE: f32 = 0.03;
const HAZARD_SWAY: f32 = 1.5;
const POWER_UP_WOBBLE_RATE: f32 = 0.05;
const POWER_UP_WOBBLE: f32 = 0.5;
const POWER_UP_SPIN: f32 = 0.02;
const HIT_EXPLOSION_SIZE: f32 = 40.0;
const PLAYER_BULLET_CULL: f32 = -10.0;
const ENEMY_BULLET_MARGIN: f32 = 10.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player at home, a full starfield, fresh
/// spawn timers and a first wave.
pub fn init_state(config: &GameConfig, viewport: Viewport, rng: &mut impl Rng) -> GameState {
    let metrics = Metrics::derive(&viewport, config);
    let (x, y) = metrics.player_home(&viewport);
    let stars = spawner::spawn_stars(config.star_count, &viewport, &metrics, rng);

    let mut state = GameState {
        player: Player {
            x,
            y,
            width: metrics.player_width,
            height: metrics.player_height,
            lives: config.player.lives,
            hit_effect_timer: 0,
            shoot_cooldown: 0,
        },
        enemies: Vec::new(),
        enemy_direction: 1.0,
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        power_ups: Vec::new(),
        hazards: Vec::new(),
        effects: Vec::new(),
        stars,
        active: ActivePowerUps::default(),
        score: 0,
        phase: GamePhase::Playing,
        frame: 0,
        power_up_timer: spawner::next_interval(&config.spawning.power_up_interval, rng),
        hazard_timer: spawner::next_interval(&config.spawning.hazard_interval, rng),
        game_over_timer: 0,
        viewport,
        metrics,
    };
    spawner::spawn_wave(&mut state, &config.enemies.shoot_interval, rng);
    state
}

/// Re-derive every scaled magnitude for a new viewport, re-home the player
/// and re-lay the enemy wave.  Other live entities keep the sizes they
/// spawned with.
pub fn apply_viewport(state: &mut GameState, viewport: Viewport, config: &GameConfig) {
    let metrics = Metrics::derive(&viewport, config);
    let (x, y) = metrics.player_home(&viewport);
    state.player.x = x;
    state.player.y = y;
    state.player.width = metrics.player_width;
    state.player.height = metrics.player_height;
    spawner::layout_wave(&mut state.enemies, &viewport, &metrics);
    state.viewport = viewport;
    state.metrics = metrics;
}

// ── Player actions ───────────────────────────────────────────────────────────

fn clamp_player_x(state: &mut GameState) {
    let half = state.player.width / 2.0;
    state.player.x = constrain(state.player.x, half, state.viewport.width - half);
}

pub fn move_player_left(state: &mut GameState, speed: f32) {
    state.player.x -= speed;
    clamp_player_x(state);
}

pub fn move_player_right(state: &mut GameState, speed: f32) {
    state.player.x += speed;
    clamp_player_x(state);
}

/// Fire from the nose: one bullet, or three parallel ones under triple-shot.
pub fn player_shoot(state: &mut GameState) {
    let m = &state.metrics;
    let y = state.player.y - m.muzzle_offset;
    let offsets: &[f32] = if state.active.is_active(PowerUpKind::TripleShot) {
        &[-1.0, 0.0, 1.0]
    } else {
        &[0.0]
    };
    for k in offsets {
        state.player_bullets.push(Bullet {
            x: state.player.x + k * m.triple_shot_spread,
            y,
            vy: -m.player_bullet_speed,
            radius: m.player_bullet_radius,
        });
    }
}

/// Current movement speed, including the speed-boost multiplier.
pub fn player_speed(state: &GameState, config: &GameConfig) -> f32 {
    if state.active.is_active(PowerUpKind::SpeedBoost) {
        state.metrics.player_speed * config.player.speed_boost_multiplier
    } else {
        state.metrics.player_speed
    }
}

fn apply_intents(state: &mut GameState, intents: &Intents, config: &GameConfig) {
    state.player.hit_effect_timer = state.player.hit_effect_timer.saturating_sub(1);

    let speed = player_speed(state, config);
    if intents.move_left {
        move_player_left(state, speed);
    }
    if intents.move_right {
        move_player_right(state, speed);
    }

    if intents.fire && state.player.shoot_cooldown == 0 {
        player_shoot(state);
        state.player.shoot_cooldown = config.player.shoot_cooldown;
    }
    state.player.shoot_cooldown = state.player.shoot_cooldown.saturating_sub(1);
}

/// Take one life.  At zero the state machine takes over.
pub fn damage_player(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    state.player.lives = state.player.lives.saturating_sub(1);
    state.player.hit_effect_timer = config.timing.hit_effect_ticks;
    debug!(lives = state.player.lives, "player hit");
    if state.player.lives == 0 {
        phase::enter_dying(state, config, rng);
    }
}

// ── Per-tick steps ───────────────────────────────────────────────────────────

fn run_spawn_timers(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    state.power_up_timer = state.power_up_timer.saturating_sub(1);
    if state.power_up_timer == 0 {
        let p = spawner::spawn_power_up(&state.viewport, &state.metrics, rng);
        debug!(kind = ?p.kind, x = p.x, "power-up spawned");
        state.power_ups.push(p);
        state.power_up_timer = spawner::next_interval(&config.spawning.power_up_interval, rng);
    }

    state.hazard_timer = state.hazard_timer.saturating_sub(1);
    if state.hazard_timer == 0 {
        let h = spawner::spawn_hazard(&state.viewport, &state.metrics, rng);
        debug!(id = h.id, x = h.x, "hazard spawned");
        state.hazards.push(h);
        state.hazard_timer = spawner::next_interval(&config.spawning.hazard_interval, rng);
    }
}

fn advance_hazards(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    let body = state.player.body_rect();
    let shielded = state.active.is_active(PowerUpKind::Shield);
    let scale = state.metrics.scale;
    let bottom = state.viewport.height;

    for i in (0..state.hazards.len()).rev() {
        let h = &mut state.hazards[i];
        let sway_phase = (h.id % 10_000) as f32 * 0.1;
        h.x += oscillate(state.frame, HAZARD_SWAY_RATE, sway_phase, HAZARD_SWAY * scale);
        h.y += h.vy;

        if circle_rect_overlap(&h.circle(), &body) {
            let h = state.hazards.remove(i);
            state
                .effects
                .push(effects::explosion(h.x, h.y, HIT_EXPLOSION_SIZE * scale));
            if !shielded {
                damage_player(state, config, rng);
                if state.phase != GamePhase::Playing {
                    return;
                }
            }
        } else if h.y - h.size / 2.0 > bottom {
            state.hazards.remove(i);
        }
    }
}

fn advance_power_ups(state: &mut GameState, config: &GameConfig) {
    let reach = state.player.pickup_rect(state.metrics.pickup_margin);
    let scale = state.metrics.scale;
    let (width, height) = (state.viewport.width, state.viewport.height);

    for i in (0..state.power_ups.len()).rev() {
        let p = &mut state.power_ups[i];
        p.y += p.fall_speed;
        p.x += oscillate(state.frame, POWER_UP_WOBBLE_RATE, p.pulse_phase, POWER_UP_WOBBLE * scale);
        p.rotation += POWER_UP_SPIN;
        for s in p.particles.iter_mut() {
            s.angle += s.speed;
        }

        if rect_overlap(&p.hitbox(), &reach) {
            let p = state.power_ups.remove(i);
            state.active.activate(p.kind, config.timing.power_up_duration);
            let c = state.player.center();
            state.effects.push(effects::power_ring(c.x, c.y, p.kind, scale));
            state.score += POWER_UP_SCORE;
            debug!(kind = ?p.kind, "power-up collected");
            continue;
        }

        let half = p.size / 2.0;
        if p.y - half > height || p.x + half < 0.0 || p.x - half > width {
            state.power_ups.remove(i);
        }
    }
}

fn advance_bullets(state: &mut GameState) {
    for b in state.player_bullets.iter_mut() {
        b.y += b.vy;
    }
    state.player_bullets.retain(|b| b.y >= PLAYER_BULLET_CULL);

    let floor = state.viewport.height + ENEMY_BULLET_MARGIN;
    for b in state.enemy_bullets.iter_mut() {
        b.y += b.vy;
    }
    state.enemy_bullets.retain(|b| b.y <= floor);
}

fn advance_enemies(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    let dir = state.enemy_direction;
    let width = state.viewport.width;
    let m = &state.metrics;
    let (mut hit_left, mut hit_right) = (false, false);

    for e in state.enemies.iter_mut() {
        e.x += dir * m.enemy_speed;
        hit_left |= e.x - e.size / 2.0 < 0.0;
        hit_right |= e.x + e.size / 2.0 > width;

        e.shoot_timer = e.shoot_timer.saturating_sub(1);
        if e.shoot_timer == 0 {
            state.enemy_bullets.push(Bullet {
                x: e.x,
                y: e.y + e.size / 2.0,
                vy: m.enemy_bullet_speed,
                radius: m.enemy_bullet_radius,
            });
            e.shoot_timer = spawner::next_interval(&config.enemies.shoot_interval, rng);
        }
    }

    // Only turn back toward the inside.  The wave layout keeps the
    // formation narrower than the viewport, so it never touches both edges.
    if hit_left && dir < 0.0 {
        state.enemy_direction = 1.0;
    } else if hit_right && dir > 0.0 {
        state.enemy_direction = -1.0;
    }
}

/// Each player bullet destroys at most one target, hazards first.
fn resolve_player_bullets(state: &mut GameState, rng: &mut impl Rng) {
    for bi in (0..state.player_bullets.len()).rev() {
        let circle = state.player_bullets[bi].circle();

        if let Some(hi) = state
            .hazards
            .iter()
            .rposition(|h| circle_rect_overlap(&circle, &h.hitbox()))
        {
            state.player_bullets.remove(bi);
            let h = state.hazards.remove(hi);
            effects::hazard_burst(&mut state.effects, h.x, h.y, h.size, rng);
            state.score += HAZARD_KILL_SCORE;
            continue;
        }

        if let Some(ei) = state
            .enemies
            .iter()
            .rposition(|e| circle_rect_overlap(&circle, &e.hitbox()))
        {
            let b = state.player_bullets.remove(bi);
            let e = state.enemies.remove(ei);
            effects::enemy_burst(&mut state.effects, (b.x, b.y), e.x, e.y, e.size, rng);
            state.score += ENEMY_KILL_SCORE;
        }
    }
}

/// Body rectangle or either wing triangle counts as a hit.
fn resolve_enemy_bullets(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    let body = state.player.body_rect();
    let wings = state.player.wings();
    let shielded = state.active.is_active(PowerUpKind::Shield);
    let size = HIT_EXPLOSION_SIZE * state.metrics.scale;

    for i in (0..state.enemy_bullets.len()).rev() {
        let c = state.enemy_bullets[i].circle();
        let hit = circle_rect_overlap(&c, &body) || wings.iter().any(|w| w.contains(c.center()));
        if !hit {
            continue;
        }

        let b = state.enemy_bullets.remove(i);
        state.effects.push(effects::explosion(b.x, b.y, size));
        if shielded {
            continue;
        }
        damage_player(state, config, rng);
        if state.phase != GamePhase::Playing {
            return;
        }
    }
}

/// Steps 3–9.  Bails out as soon as the player dies.
fn resolve_gameplay(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    advance_hazards(state, config, rng);
    if state.phase != GamePhase::Playing {
        return;
    }
    advance_power_ups(state, config);
    advance_bullets(state);
    advance_enemies(state, config, rng);
    resolve_player_bullets(state, rng);
    resolve_enemy_bullets(state, config, rng);
    if state.phase != GamePhase::Playing {
        return;
    }
    if state.enemies.is_empty() {
        spawner::spawn_wave(state, &config.enemies.shoot_interval, rng);
    }
}

fn advance_stars(state: &mut GameState, rng: &mut impl Rng) {
    let (width, height) = (state.viewport.width, state.viewport.height);
    for s in state.stars.iter_mut() {
        s.y += s.speed;
        if s.y > height {
            s.y = 0.0;
            s.x = random_between(rng, 0.0, width);
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick and report a phase transition, if one
/// happened.  Gameplay only runs while `Playing`; stars, effects and the
/// state machine run in every phase.
pub fn tick(
    state: &mut GameState,
    intents: &Intents,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<Transition> {
    state.frame += 1;
    advance_stars(state, rng);

    let mut transition = None;
    if state.phase == GamePhase::Playing {
        apply_intents(state, intents, config);
        state.active.decay();
        run_spawn_timers(state, config, rng);
        resolve_gameplay(state, config, rng);
        if state.phase == GamePhase::Dying {
            transition = Some(Transition::Dying);
        }
    }

    effects::advance_effects(&mut state.effects);
    phase::advance_phase(state, config, rng).or(transition)
}
