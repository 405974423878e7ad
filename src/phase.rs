//! Game state machine: `Playing → Dying → GameOver → Playing`.
//!
//! Death is two-phase so the death-explosion animation always finishes
//! before the game is reported over.

use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::effects;
use crate::entities::{GamePhase, GameState};
use crate::spawner;
use crate::utils::random_between;

/// Phase changes reported back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Dying,
    /// The death animation finished; the host shows its game-over view.
    GameOver,
    /// A fresh game started after game over.
    Restarted,
}

/// `Playing → Dying`: pin lives at zero and scatter the death burst around
/// the ship.  Has no effect outside `Playing`.
pub fn enter_dying(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.player.lives = 0;
    state.phase = GamePhase::Dying;

    let p = &state.player;
    let scale = state.metrics.scale;
    for _ in 0..config.timing.death_explosions {
        let x = p.x + random_between(rng, -p.width, p.width);
        let y = p.y + random_between(rng, -p.height, p.height);
        let size = (70.0 + random_between(rng, 0.0, 20.0)) * scale;
        let frame = random_between(rng, 0.0, 5.0);
        state.effects.push(effects::death_explosion(x, y, size, frame));
    }
    info!(score = state.score, frame = state.frame, "player destroyed");
}

/// Run the phase checks that follow effect advancement.
pub fn advance_phase(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<Transition> {
    match state.phase {
        GamePhase::Playing => None,
        GamePhase::Dying => {
            if state.death_explosions_remaining() > 0 {
                return None;
            }
            state.phase = GamePhase::GameOver;
            state.game_over_timer = 0;
            info!(score = state.score, "game over");
            Some(Transition::GameOver)
        }
        GamePhase::GameOver => {
            state.game_over_timer += 1;
            if state.game_over_timer < config.timing.game_over_ticks {
                return None;
            }
            reset_game(state, config, rng);
            Some(Transition::Restarted)
        }
    }
}

/// Back to a fresh `Playing` state: collections cleared, lives, score and
/// timers at their initial values, a new wave in place.
pub fn reset_game(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    state.clear_entities();
    state.active.clear();

    let (x, y) = state.metrics.player_home(&state.viewport);
    let player = &mut state.player;
    player.x = x;
    player.y = y;
    player.lives = config.player.lives;
    player.hit_effect_timer = 0;
    player.shoot_cooldown = 0;

    state.score = 0;
    state.enemy_direction = 1.0;
    state.game_over_timer = 0;
    state.power_up_timer = spawner::next_interval(&config.spawning.power_up_interval, rng);
    state.hazard_timer = spawner::next_interval(&config.spawning.hazard_interval, rng);
    state.phase = GamePhase::Playing;
    spawner::spawn_wave(state, &config.enemies.shoot_interval, rng);
    info!(frame = state.frame, "game reset");
}
