use zombie_survival::compute::init_state;
use zombie_survival::config::GameConfig;
use zombie_survival::entities::*;

fn effect(elapsed: u32) -> AttackEffect {
    AttackEffect {
        x: 0.0,
        y: 0.0,
        angle: 0.0,
        size: 50.0,
        elapsed,
        duration: 15,
    }
}

#[test]
fn effect_fades_linearly() {
    assert_eq!(effect(0).opacity(), 1.0);
    assert!((effect(5).opacity() - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(effect(15).opacity(), 0.0);
    // Never negative even if it outlived its duration.
    assert_eq!(effect(20).opacity(), 0.0);
}

#[test]
fn effect_expires_at_duration() {
    assert!(!effect(14).is_expired());
    assert!(effect(15).is_expired());
}

#[test]
fn enemy_dead_at_zero_health() {
    let config = GameConfig::default();
    let mut e = Enemy::new(0.0, 0.0, &config);
    assert!(!e.is_dead());
    e.health = 0;
    assert!(e.is_dead());
    e.health = -20;
    assert!(e.is_dead());
}

#[test]
fn player_takes_stats_from_config() {
    let mut config = GameConfig::default();
    config.player.speed = 7.0;
    config.player.max_health = 60;
    let p = Player::new(1.0, 2.0, &config);
    assert_eq!(p.speed, 7.0);
    assert_eq!(p.health, 60);
    assert_eq!(p.max_health, 60);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&GameConfig::default(), 800.0, 600.0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned
        .enemies
        .push(Enemy::new(5.0, 5.0, &GameConfig::default()));

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
