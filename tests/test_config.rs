use std::path::Path;

use scroll_shooter::config::{ConfigError, GameConfig};
use scroll_shooter::constants::*;

#[test]
fn empty_document_is_all_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.max_lives, MAX_LIVES);
    assert_eq!(config.shoot_cooldown_ms, SHOOT_COOLDOWN_MS);
}

#[test]
fn partial_document_overrides_named_keys() {
    let config = GameConfig::from_toml_str("max_lives = 3\nitem_drop_chance = 0.5\n").unwrap();
    assert_eq!(config.max_lives, 3);
    assert_eq!(config.item_drop_chance, 0.5);
    assert_eq!(config.viewport_width, VIEWPORT_WIDTH);
    assert_eq!(config.log_file, "scroll_shooter.log");
}

#[test]
fn out_of_range_drop_chance_is_rejected() {
    match GameConfig::from_toml_str("item_drop_chance = 1.5") {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "item_drop_chance"),
        other => panic!("expected invalid field, got {:?}", other),
    }
}

#[test]
fn inverted_power_durations_are_rejected() {
    let doc = "power_duration_min_ms = 9000\npower_duration_max_ms = 8000";
    match GameConfig::from_toml_str(doc) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "power_duration_min_ms"),
        other => panic!("expected invalid field, got {:?}", other),
    }
}

#[test]
fn zero_lives_are_rejected() {
    assert!(matches!(
        GameConfig::from_toml_str("max_lives = 0"),
        Err(ConfigError::Invalid { field: "max_lives", .. })
    ));
}

#[test]
fn mistyped_value_is_a_parse_error() {
    let err = GameConfig::from_toml_str("max_lives = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("could not parse config"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = GameConfig::load(Path::new("/nonexistent/scroll_shooter.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn log_level_parses_with_fallback() {
    let mut config = GameConfig::default();
    config.log_level = "debug".to_string();
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    config.log_level = "loud".to_string();
    assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
}

// ── Numeric ranges ────────────────────────────────────────────────────────────

fn rejected_field(doc: &str) -> Option<&'static str> {
    match GameConfig::from_toml_str(doc) {
        Err(ConfigError::Invalid { field, .. }) => Some(field),
        _ => None,
    }
}

#[test]
fn non_finite_floats_are_rejected() {
    assert_eq!(rejected_field("viewport_width = nan"), Some("viewport_width"));
    assert_eq!(rejected_field("viewport_height = nan"), Some("viewport_height"));
    assert_eq!(rejected_field("scroll_speed = inf"), Some("scroll_speed"));
    assert_eq!(rejected_field("player_speed = -inf"), Some("player_speed"));
    assert_eq!(rejected_field("bullet_speed = nan"), Some("bullet_speed"));
    assert_eq!(rejected_field("enemy_spawn_interval = inf"), Some("enemy_spawn_interval"));
}

#[test]
fn bullets_must_travel_upward() {
    assert_eq!(rejected_field("bullet_speed = 10.0"), Some("bullet_speed"));
    assert_eq!(rejected_field("bullet_speed = 0.0"), Some("bullet_speed"));
    assert!(GameConfig::from_toml_str("bullet_speed = -4.0").is_ok());
}

#[test]
fn speeds_and_spawn_interval_must_not_be_negative() {
    assert_eq!(rejected_field("scroll_speed = -1.0"), Some("scroll_speed"));
    assert_eq!(rejected_field("player_speed = -5.0"), Some("player_speed"));
    assert_eq!(rejected_field("enemy_spawn_interval = -150.0"), Some("enemy_spawn_interval"));
    let still = "scroll_speed = 0.0\nplayer_speed = 0.0\nenemy_spawn_interval = 0.0";
    assert!(GameConfig::from_toml_str(still).is_ok());
}
