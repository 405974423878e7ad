use approx::assert_relative_eq;

use backdrop_shooter::config::ScalingConfig;
use backdrop_shooter::scaling::*;
use backdrop_shooter::{GameConfig, GameError};

fn vp(width: f32, height: f32) -> Viewport {
    Viewport::new(width, height, DeviceClass::Pointer).unwrap()
}

// ── scale_factor ──────────────────────────────────────────────────────────────

#[test]
fn reference_viewport_is_scale_one() {
    assert_relative_eq!(scale_factor(&vp(1280.0, 720.0), &ScalingConfig::default()), 1.0);
}

#[test]
fn scale_follows_the_tighter_side() {
    let c = ScalingConfig::default();
    assert_relative_eq!(scale_factor(&vp(960.0, 720.0), &c), 0.75);
    assert_relative_eq!(scale_factor(&vp(1280.0, 540.0), &c), 0.75);
}

#[test]
fn scale_clamped_to_bounds() {
    let c = ScalingConfig::default();
    assert_relative_eq!(scale_factor(&vp(320.0, 180.0), &c), 0.5);
    assert_relative_eq!(scale_factor(&vp(2560.0, 1440.0), &c), 1.0);
}

// ── Device class ──────────────────────────────────────────────────────────────

#[test]
fn narrow_viewport_is_touch_class() {
    let c = ScalingConfig::default();
    assert!(is_touch_class(&vp(600.0, 900.0), &c));
    assert!(!is_touch_class(&vp(601.0, 900.0), &c));
}

#[test]
fn touch_hint_wins_at_any_width() {
    let v = Viewport::new(1920.0, 1080.0, DeviceClass::Touch).unwrap();
    assert!(is_touch_class(&v, &ScalingConfig::default()));
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[test]
fn metrics_scale_every_magnitude() {
    let m = Metrics::derive(&vp(960.0, 720.0), &GameConfig::default());
    assert_relative_eq!(m.scale, 0.75);
    assert_relative_eq!(m.player_width, 30.0);
    assert_relative_eq!(m.player_height, 45.0);
    assert_relative_eq!(m.player_speed, 5.25);
    assert_relative_eq!(m.player_bullet_speed, 11.25);
    assert_relative_eq!(m.enemy_size, 30.0);
    assert_relative_eq!(m.enemy_spacing, 75.0);
    assert_relative_eq!(m.enemy_bullet_radius, 1.5);
    assert_relative_eq!(m.hazard_size.start, 18.75);
    assert_relative_eq!(m.hazard_size.end, 33.75);
}

#[test]
fn pointer_layout_has_no_control_band() {
    let v = vp(1280.0, 720.0);
    let m = Metrics::derive(&v, &GameConfig::default());
    assert!(!m.touch_controls);
    assert_relative_eq!(m.control_band, 0.0);
    let (x, y) = m.player_home(&v);
    assert_relative_eq!(x, 640.0);
    assert_relative_eq!(y, 640.0);
}

#[test]
fn touch_layout_lifts_the_player_above_the_buttons() {
    let v = Viewport::new(1280.0, 720.0, DeviceClass::Touch).unwrap();
    let m = Metrics::derive(&v, &GameConfig::default());
    assert!(m.touch_controls);
    assert_relative_eq!(m.control_band, 60.0);
    let (_, y) = m.player_home(&v);
    assert_relative_eq!(y, 580.0);
}

// ── Viewport validation ───────────────────────────────────────────────────────

#[test]
fn zero_or_nan_viewport_rejected() {
    for (w, h) in [(0.0, 720.0), (1280.0, -1.0), (f32::NAN, 720.0), (f32::INFINITY, 720.0)] {
        let err = Viewport::new(w, h, DeviceClass::Pointer).unwrap_err();
        assert!(matches!(err, GameError::InvalidViewport { .. }));
    }
}
