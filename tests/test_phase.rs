use backdrop_shooter::compute::{init_state, tick};
use backdrop_shooter::entities::*;
use backdrop_shooter::input::Intents;
use backdrop_shooter::phase::{advance_phase, enter_dying, reset_game};
use backdrop_shooter::scaling::{DeviceClass, Viewport};
use backdrop_shooter::spawner::WAVE_SIZE;
use backdrop_shooter::{GameConfig, Transition};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state() -> GameState {
    let viewport = Viewport::new(1280.0, 720.0, DeviceClass::Pointer).unwrap();
    let mut s = init_state(&GameConfig::default(), viewport, &mut seeded_rng());
    s.power_up_timer = 10_000;
    s.hazard_timer = 10_000;
    for e in s.enemies.iter_mut() {
        e.shoot_timer = 10_000;
    }
    s
}

fn idle(s: &mut GameState) -> Option<Transition> {
    tick(s, &Intents::default(), &GameConfig::default(), &mut seeded_rng())
}

/// Put a stationary enemy bullet in the middle of the ship.
fn shoot_player(s: &mut GameState) {
    let c = s.player.center();
    s.enemy_bullets.push(Bullet { x: c.x, y: c.y, vy: 0.0, radius: 2.0 });
}

/// Tick until the next transition, giving up after `limit` ticks.
fn run_until_transition(s: &mut GameState, limit: usize) -> Option<Transition> {
    (0..limit).find_map(|_| idle(s))
}

// ── Playing → Dying ───────────────────────────────────────────────────────────

#[test]
fn losing_the_last_life_starts_dying() {
    let mut s = make_state();
    s.player.lives = 1;
    shoot_player(&mut s);
    assert_eq!(idle(&mut s), Some(Transition::Dying));
    assert_eq!(s.player.lives, 0);
    assert_eq!(s.phase, GamePhase::Dying);
    assert_eq!(s.death_explosions_remaining(), 5);
}

#[test]
fn losing_a_spare_life_keeps_playing() {
    let mut s = make_state();
    s.player.lives = 2;
    shoot_player(&mut s);
    assert_eq!(idle(&mut s), None);
    assert_eq!(s.player.lives, 1);
    assert_eq!(s.phase, GamePhase::Playing);
}

#[test]
fn death_explosions_surround_the_ship() {
    let mut s = make_state();
    enter_dying(&mut s, &GameConfig::default(), &mut seeded_rng());
    let (px, py, w, h) = (s.player.x, s.player.y, s.player.width, s.player.height);
    for effect in &s.effects {
        match effect {
            Effect::Explosion(e) => {
                assert!(e.death);
                assert!((e.x - px).abs() <= w);
                assert!((e.y - py).abs() <= h);
                assert!(e.size >= 70.0 && e.size <= 90.0);
                assert!(e.frame >= 0.0 && e.frame < 5.0);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }
}

#[test]
fn enter_dying_is_ignored_outside_playing() {
    let mut s = make_state();
    s.phase = GamePhase::GameOver;
    enter_dying(&mut s, &GameConfig::default(), &mut seeded_rng());
    assert_eq!(s.phase, GamePhase::GameOver);
    assert!(s.effects.is_empty());
}

#[test]
fn gameplay_freezes_while_dying() {
    let mut s = make_state();
    s.player.lives = 1;
    shoot_player(&mut s);
    idle(&mut s);
    let enemies = s.enemies.clone();
    let score = s.score;
    s.player_bullets.push(Bullet { x: 100.0, y: 300.0, vy: -15.0, radius: 3.0 });

    idle(&mut s);
    assert_eq!(s.enemies, enemies);
    assert_eq!(s.score, score);
    assert_eq!(s.player_bullets[0].y, 300.0);
}

#[test]
fn fire_intent_ignored_while_dying() {
    let mut s = make_state();
    s.player.lives = 1;
    shoot_player(&mut s);
    idle(&mut s);
    let fire = Intents { fire: true, ..Intents::default() };
    tick(&mut s, &fire, &GameConfig::default(), &mut seeded_rng());
    assert!(s.player_bullets.is_empty());
}

// ── Dying → GameOver ──────────────────────────────────────────────────────────

#[test]
fn game_over_waits_for_death_explosions() {
    let mut s = make_state();
    s.player.lives = 1;
    shoot_player(&mut s);
    idle(&mut s);

    assert_eq!(run_until_transition(&mut s, 40), Some(Transition::GameOver));
    assert_eq!(s.phase, GamePhase::GameOver);
    assert_eq!(s.death_explosions_remaining(), 0);
    assert_eq!(s.game_over_timer, 0);
}

#[test]
fn dying_without_explosions_is_over_at_once() {
    let mut s = make_state();
    s.phase = GamePhase::Dying;
    s.player.lives = 0;
    let config = GameConfig::default();
    assert_eq!(
        advance_phase(&mut s, &config, &mut seeded_rng()),
        Some(Transition::GameOver)
    );
}

#[test]
fn other_effects_do_not_delay_game_over() {
    let mut s = make_state();
    s.phase = GamePhase::Dying;
    s.player.lives = 0;
    s.effects.push(Effect::Explosion(Explosion {
        x: 0.0,
        y: 0.0,
        size: 40.0,
        frame: 0.0,
        death: false,
    }));
    assert_eq!(idle(&mut s), Some(Transition::GameOver));
}

// ── GameOver → Playing ────────────────────────────────────────────────────────

#[test]
fn game_over_restarts_after_its_delay() {
    let mut s = make_state();
    s.phase = GamePhase::GameOver;
    s.player.lives = 0;
    s.score = 120;
    s.game_over_timer = 0;
    s.player_bullets.push(Bullet { x: 100.0, y: 300.0, vy: -15.0, radius: 3.0 });
    s.active.activate(PowerUpKind::Shield, 300);

    for _ in 0..239 {
        assert_eq!(idle(&mut s), None);
    }
    assert_eq!(s.phase, GamePhase::GameOver);
    assert_eq!(s.game_over_timer, 239);

    assert_eq!(idle(&mut s), Some(Transition::Restarted));
    assert_eq!(s.phase, GamePhase::Playing);
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), WAVE_SIZE);
    assert!(s.player_bullets.is_empty());
    assert!(s.enemy_bullets.is_empty());
    assert!(s.power_ups.is_empty());
    assert!(s.hazards.is_empty());
    assert!(s.effects.is_empty());
    assert!(!s.active.is_active(PowerUpKind::Shield));
}

#[test]
fn reset_restores_player_and_keeps_stars() {
    let mut s = make_state();
    let stars = s.stars.len();
    s.player.x = 100.0;
    s.player.lives = 0;
    s.player.hit_effect_timer = 12;
    s.enemy_direction = -1.0;
    s.phase = GamePhase::GameOver;

    reset_game(&mut s, &GameConfig::default(), &mut seeded_rng());
    assert_eq!(s.player.x, 640.0);
    assert_eq!(s.player.y, 640.0);
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.player.hit_effect_timer, 0);
    assert_eq!(s.enemy_direction, 1.0);
    assert_eq!(s.stars.len(), stars);
    assert!((300..900).contains(&s.power_up_timer));
    assert!((180..420).contains(&s.hazard_timer));
}

#[test]
fn full_cycle_returns_to_playing() {
    let mut s = make_state();
    s.player.lives = 1;
    shoot_player(&mut s);

    assert_eq!(idle(&mut s), Some(Transition::Dying));
    assert_eq!(run_until_transition(&mut s, 40), Some(Transition::GameOver));
    assert_eq!(run_until_transition(&mut s, 240), Some(Transition::Restarted));
    assert_eq!(s.phase, GamePhase::Playing);
}
