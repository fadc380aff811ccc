use std::io::Write;

use zombie_survival::config::GameConfig;
use zombie_survival::error::GameError;

#[test]
fn defaults_match_stock_game() {
    let c = GameConfig::default();
    assert_eq!(c.player.width, 80.0);
    assert_eq!(c.player.speed, 4.0);
    assert_eq!(c.player.max_health, 100);
    assert_eq!(c.enemy.speed, 1.5);
    assert_eq!(c.enemy.max_health, 30);
    assert_eq!(c.enemy.contact_damage, 5);
    assert_eq!(c.enemy.damage_interval, 30);
    assert_eq!(c.enemy.kill_score, 10);
    assert_eq!(c.spawn.interval, 360);
    assert_eq!(c.spawn.max_enemies, 6);
    assert_eq!(c.spawn.edge_offset, 50.0);
    assert_eq!(c.attack.cooldown, 20);
    assert_eq!(c.attack.range, 100.0);
    assert_eq!(c.attack.damage, 25);
    assert_eq!(c.attack.effect_duration, 15);
    assert_eq!(c.pacing.tick_rate, 60);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let c = GameConfig::from_toml_str(
        r#"
        [spawn]
        interval = 120

        [loop]
        tick_rate = 30
        "#,
    )
    .unwrap();
    assert_eq!(c.spawn.interval, 120);
    assert_eq!(c.spawn.max_enemies, 6);
    assert_eq!(c.pacing.tick_rate, 30);
    assert_eq!(c.pacing.render_fps, 30);
}

#[test]
fn unknown_field_is_rejected() {
    let err = GameConfig::from_toml_str("[enemy]\nsped = 2.0\n").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }), "{err}");
}

#[test]
fn zero_tick_rate_is_invalid() {
    let err = GameConfig::from_toml_str("[loop]\ntick_rate = 0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)), "{err}");
}

#[test]
fn zero_effect_duration_is_invalid() {
    let mut c = GameConfig::default();
    c.attack.effect_duration = 0;
    assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[attack]\ndamage = 40").unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.attack.damage, 40);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, GameError::Io { .. }), "{err}");
}
