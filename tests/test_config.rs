use std::io::Write;

use backdrop_shooter::{GameConfig, GameError};

#[test]
fn defaults_are_valid() {
    let c = GameConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.player.lives, 3);
    assert_eq!(c.enemies.shoot_interval, 60..120);
    assert_eq!(c.timing.power_up_duration, 600);
    assert_eq!(c.timing.game_over_ticks, 240);
}

#[test]
fn empty_toml_gives_defaults() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let c = GameConfig::from_toml_str(
        r#"
        star_count = 40

        [player]
        lives = 5

        [enemies]
        shoot_interval = { start = 30, end = 45 }
        "#,
    )
    .unwrap();
    assert_eq!(c.star_count, 40);
    assert_eq!(c.player.lives, 5);
    assert_eq!(c.player.speed, GameConfig::default().player.speed);
    assert_eq!(c.enemies.shoot_interval, 30..45);
    assert_eq!(c.timing, GameConfig::default().timing);
}

#[test]
fn zero_lives_rejected() {
    let err = GameConfig::from_toml_str("[player]\nlives = 0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "player.lives", .. }));
}

#[test]
fn zero_length_interval_rejected() {
    let err = GameConfig::from_toml_str("[spawning]\nhazard_interval = { start = 0, end = 10 }\n")
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidConfig { field: "spawning.hazard_interval", .. }
    ));

    let err = GameConfig::from_toml_str("[enemies]\nshoot_interval = { start = 50, end = 50 }\n")
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "enemies.shoot_interval", .. }));
}

#[test]
fn non_positive_sizes_rejected() {
    let err = GameConfig::from_toml_str("[enemies]\nsize = -4.0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "enemies.size", .. }));
}

#[test]
fn inverted_scale_bounds_rejected() {
    let err = GameConfig::from_toml_str("[scaling]\nmin_scale = 0.9\nmax_scale = 0.5\n")
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "scaling.max_scale", .. }));
}

#[test]
fn non_finite_floats_rejected() {
    let cases = [
        ("[scaling]\nmax_scale = nan\n", "scaling.max_scale"),
        ("[scaling]\ntouch_max_width = inf\n", "scaling.touch_max_width"),
        ("[spawning]\nhazard_speed = { start = 1.0, end = inf }\n", "spawning.hazard_speed"),
        ("[spawning]\nhazard_size = { start = nan, end = 40.0 }\n", "spawning.hazard_size"),
        ("[enemies]\nrow_y = nan\n", "enemies.row_y"),
        ("[enemies]\nspacing = inf\n", "enemies.spacing"),
        ("[player]\nmuzzle_offset = nan\n", "player.muzzle_offset"),
        ("[player]\ntriple_shot_spread = -inf\n", "player.triple_shot_spread"),
        ("[player]\npickup_margin = nan\n", "player.pickup_margin"),
    ];
    for (text, expected) in cases {
        match GameConfig::from_toml_str(text) {
            Err(GameError::InvalidConfig { field, .. }) => assert_eq!(field, expected, "{text}"),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn zero_death_explosions_rejected() {
    let err = GameConfig::from_toml_str("[timing]\ndeath_explosions = 0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig { field: "timing.death_explosions", .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[player\nlives = 3").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[player]\nlives = \"three\"\n").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
}

#[test]
fn load_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[timing]\ngame_over_ticks = 120").unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.timing.game_over_ticks, 120);
}

#[test]
fn load_reports_the_path_on_parse_failure() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not toml").unwrap();
    match GameConfig::load(file.path()) {
        Err(GameError::ConfigParse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn config_round_trips_through_toml() {
    let text = toml::to_string(&GameConfig::default()).unwrap();
    let back = GameConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, GameConfig::default());
}
