//! Responsive scaling.
//!
//! A single factor is derived from the viewport and device class; every size,
//! speed and hit-target magnitude handed to the simulation is the configured
//! base value multiplied by it.  Collision logic never sees the factor itself.

use std::ops::Range;

use crate::config::{GameConfig, ScalingConfig};
use crate::error::{GameError, GameResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
    Touch,
    #[default]
    Pointer,
}

/// Drawable surface size plus the host's device-class hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device: DeviceClass,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device: DeviceClass) -> GameResult<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(GameError::InvalidViewport { width, height });
        }
        Ok(Viewport { width, height, device })
    }
}

/// Touch-class when the host says so, or when the viewport is phone-narrow.
pub fn is_touch_class(viewport: &Viewport, config: &ScalingConfig) -> bool {
    viewport.device == DeviceClass::Touch || viewport.width <= config.touch_max_width
}

/// Fit the reference viewport into the real one, clamped to the configured
/// bounds.
pub fn scale_factor(viewport: &Viewport, config: &ScalingConfig) -> f32 {
    let fit = (viewport.width / config.reference_width)
        .min(viewport.height / config.reference_height);
    fit.clamp(config.min_scale, config.max_scale)
}

/// Scaled magnitudes for one viewport.  Recomputed whenever the viewport
/// changes; entities already alive keep the sizes they spawned with.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    pub scale: f32,
    pub touch_controls: bool,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_radius: f32,
    pub muzzle_offset: f32,
    pub triple_shot_spread: f32,
    pub pickup_margin: f32,

    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub enemy_spacing: f32,
    pub enemy_row_y: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_radius: f32,

    pub power_up_size: f32,
    pub power_up_speed: Range<f32>,
    pub hazard_size: Range<f32>,
    pub hazard_speed: Range<f32>,

    pub star_speed: Range<f32>,
    pub star_size: Range<f32>,

    pub button_size: f32,
    /// Height reserved at the bottom for on-screen buttons (zero without them).
    pub control_band: f32,
}

fn scaled(range: &Range<f32>, s: f32) -> Range<f32> {
    range.start * s..range.end * s
}

impl Metrics {
    pub fn derive(viewport: &Viewport, config: &GameConfig) -> Metrics {
        let s = scale_factor(viewport, &config.scaling);
        let touch_controls = is_touch_class(viewport, &config.scaling);
        let button_size = config.scaling.button_size * s;
        let p = &config.player;
        let e = &config.enemies;
        let sp = &config.spawning;

        Metrics {
            scale: s,
            touch_controls,

            player_width: p.width * s,
            player_height: p.height * s,
            player_speed: p.speed * s,
            player_bullet_speed: p.bullet_speed * s,
            player_bullet_radius: 3.0 * s,
            muzzle_offset: p.muzzle_offset * s,
            triple_shot_spread: p.triple_shot_spread * s,
            pickup_margin: p.pickup_margin * s,

            enemy_size: e.size * s,
            enemy_speed: e.speed * s,
            enemy_spacing: e.spacing * s,
            enemy_row_y: e.row_y * s,
            enemy_bullet_speed: e.bullet_speed * s,
            enemy_bullet_radius: 2.0 * s,

            power_up_size: sp.power_up_size * s,
            power_up_speed: scaled(&sp.power_up_speed, s),
            hazard_size: scaled(&sp.hazard_size, s),
            hazard_speed: scaled(&sp.hazard_speed, s),

            star_speed: 1.0..3.0,
            star_size: 1.0..3.0,

            button_size,
            control_band: if touch_controls { button_size } else { 0.0 },
        }
    }

    /// Resting position of the player: centred, above the control band.
    pub fn player_home(&self, viewport: &Viewport) -> (f32, f32) {
        let y = viewport.height - self.control_band - 20.0 * self.scale - self.player_height;
        (viewport.width / 2.0, y.max(0.0))
    }
}
