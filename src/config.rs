//! Runtime-tunable gameplay configuration.
//!
//! [`GameConfig`] deserialises from TOML with `#[serde(default)]` on every
//! section, so a file only needs the keys it wants to override:
//!
//! ```toml
//! star_count = 150
//!
//! [spawning]
//! power_up_interval = { start = 300, end = 600 }
//! ```
//!
//! Lengths and speeds are given at scale 1.0 (a 1280×720 viewport); the
//! scaling layer multiplies them by the derived factor.  Durations are in
//! ticks.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub star_count: usize,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub spawning: SpawnConfig,
    pub timing: TimingConfig,
    pub scaling: ScalingConfig,
    pub input: InputConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            star_count: 100,
            player: PlayerConfig::default(),
            enemies: EnemyConfig::default(),
            spawning: SpawnConfig::default(),
            timing: TimingConfig::default(),
            scaling: ScalingConfig::default(),
            input: InputConfig::default(),
        }
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub lives: u32,
    pub width: f32,
    pub height: f32,
    /// Horizontal units per tick while a move intent is held.
    pub speed: f32,
    pub bullet_speed: f32,
    /// Bullets leave this far above the ship's top edge.
    pub muzzle_offset: f32,
    pub shoot_cooldown: u32,
    pub speed_boost_multiplier: f32,
    /// Horizontal offset of the outer bullets while triple-shot is active.
    pub triple_shot_spread: f32,
    /// Extra reach around the body when collecting power-ups.
    pub pickup_margin: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            lives: 3,
            width: 40.0,
            height: 60.0,
            speed: 7.0,
            bullet_speed: 15.0,
            muzzle_offset: 15.0,
            shoot_cooldown: 10,
            speed_boost_multiplier: 1.5,
            triple_shot_spread: 15.0,
            pickup_margin: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub speed: f32,
    pub spacing: f32,
    pub row_y: f32,
    pub bullet_speed: f32,
    pub shoot_interval: Range<u32>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            size: 40.0,
            speed: 2.0,
            spacing: 100.0,
            row_y: 80.0,
            bullet_speed: 5.0,
            shoot_interval: 60..120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub power_up_interval: Range<u32>,
    pub hazard_interval: Range<u32>,
    pub power_up_size: f32,
    pub power_up_speed: Range<f32>,
    pub hazard_size: Range<f32>,
    pub hazard_speed: Range<f32>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            power_up_interval: 300..900,
            hazard_interval: 180..420,
            power_up_size: 30.0,
            power_up_speed: 1.5..3.0,
            hazard_size: 25.0..45.0,
            hazard_speed: 1.0..2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub power_up_duration: u32,
    pub game_over_ticks: u32,
    pub hit_effect_ticks: u32,
    pub death_explosions: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            power_up_duration: 600,
            game_over_ticks: 240,
            hit_effect_ticks: 30,
            death_explosions: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScalingConfig {
    pub reference_width: f32,
    pub reference_height: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Viewports at most this wide are treated as touch-class.
    pub touch_max_width: f32,
    pub button_size: f32,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        ScalingConfig {
            reference_width: 1280.0,
            reference_height: 720.0,
            min_scale: 0.5,
            max_scale: 1.0,
            touch_max_width: 600.0,
            button_size: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// A key counts as held for this many ticks after its last press or
    /// repeat event (terminals without release events).
    pub hold_window_ticks: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig { hold_window_ticks: 8 }
    }
}

// ── Loading & validation ──────────────────────────────────────────────────────

impl GameConfig {
    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text that did not come from a file.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(text).map_err(|source| GameError::ConfigParse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.  Every float must be
    /// finite; NaN fails every comparison and would slip past range checks.
    pub fn validate(&self) -> GameResult<()> {
        let p = &self.player;
        positive("player.width", p.width)?;
        positive("player.height", p.height)?;
        positive("player.speed", p.speed)?;
        positive("player.bullet_speed", p.bullet_speed)?;
        positive("player.speed_boost_multiplier", p.speed_boost_multiplier)?;
        non_negative("player.muzzle_offset", p.muzzle_offset)?;
        non_negative("player.triple_shot_spread", p.triple_shot_spread)?;
        non_negative("player.pickup_margin", p.pickup_margin)?;
        if p.lives == 0 {
            return Err(invalid("player.lives", "must be at least 1"));
        }

        let e = &self.enemies;
        positive("enemies.size", e.size)?;
        positive("enemies.speed", e.speed)?;
        non_negative("enemies.spacing", e.spacing)?;
        non_negative("enemies.row_y", e.row_y)?;
        positive("enemies.bullet_speed", e.bullet_speed)?;
        tick_range("enemies.shoot_interval", &e.shoot_interval)?;

        let sp = &self.spawning;
        tick_range("spawning.power_up_interval", &sp.power_up_interval)?;
        tick_range("spawning.hazard_interval", &sp.hazard_interval)?;
        positive("spawning.power_up_size", sp.power_up_size)?;
        span("spawning.power_up_speed", &sp.power_up_speed)?;
        span("spawning.hazard_size", &sp.hazard_size)?;
        span("spawning.hazard_speed", &sp.hazard_speed)?;

        if self.timing.power_up_duration == 0 {
            return Err(invalid("timing.power_up_duration", "must be at least 1 tick"));
        }
        // The death burst is what ends the Dying phase.
        if self.timing.death_explosions == 0 {
            return Err(invalid("timing.death_explosions", "must be at least 1"));
        }

        let sc = &self.scaling;
        positive("scaling.reference_width", sc.reference_width)?;
        positive("scaling.reference_height", sc.reference_height)?;
        positive("scaling.min_scale", sc.min_scale)?;
        positive("scaling.max_scale", sc.max_scale)?;
        non_negative("scaling.touch_max_width", sc.touch_max_width)?;
        positive("scaling.button_size", sc.button_size)?;
        if sc.max_scale < sc.min_scale {
            return Err(invalid("scaling.max_scale", "must not be below scaling.min_scale"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> GameError {
    GameError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: format!("must be a finite number >= 0, got {value}"),
        })
    }
}

fn tick_range(field: &'static str, range: &Range<u32>) -> GameResult<()> {
    if range.start >= 1 && range.end > range.start {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: format!("needs 1 <= start < end, got {}..{}", range.start, range.end),
        })
    }
}

fn span(field: &'static str, range: &Range<f32>) -> GameResult<()> {
    if range.start > 0.0 && range.end >= range.start && range.end.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: format!("needs 0 < start <= end, got {}..{}", range.start, range.end),
        })
    }
}
