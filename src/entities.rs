//! All game entity types: pure data, no logic.

use crate::config::GameConfig;

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Centre of the sprite, canvas units.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// May dip below zero on the tick that ends the game.
    pub health: i32,
    pub max_health: i32,
    pub vx: f32,
    pub vy: f32,
    /// Set by the first attack and never cleared.
    pub attacking: bool,
    /// Ticks until the next attack is allowed.
    pub attack_cooldown: i32,
    /// Facing, radians.  Only pointer-follow movement changes it.
    pub angle: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Player {
            x,
            y,
            width: config.player.width,
            height: config.player.height,
            speed: config.player.speed,
            health: config.player.max_health,
            max_health: config.player.max_health,
            vx: 0.0,
            vy: 0.0,
            attacking: false,
            attack_cooldown: 0,
            angle: 0.0,
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Ticks until this enemy may hurt the player again.
    pub damage_timer: i32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Enemy {
            x,
            y,
            width: config.enemy.width,
            height: config.enemy.height,
            speed: config.enemy.speed,
            health: config.enemy.max_health,
            max_health: config.enemy.max_health,
            damage_timer: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

// ── Attack effect ─────────────────────────────────────────────────────────────

/// Purely visual swipe left behind by an attack.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackEffect {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub size: f32,
    pub elapsed: u32,
    pub duration: u32,
}

impl AttackEffect {
    /// Fades linearly from 1.0 at creation to 0.0 at expiry.
    pub fn opacity(&self) -> f32 {
        (1.0 - self.elapsed as f32 / self.duration as f32).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// The three numbers shown on the HUD after every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudValues {
    /// Player health floored at zero.
    pub health: i32,
    pub enemy_count: usize,
    pub score: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub effects: Vec<AttackEffect>,
    pub score: u32,
    /// False once the game is over; never set back to true.
    pub running: bool,
    pub is_over: bool,
    /// Ticks since the last spawn.
    pub spawn_timer: u32,
    /// Ticks simulated so far.
    pub frame: u64,
    /// Canvas size, canvas units.
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn hud(&self) -> HudValues {
        HudValues {
            health: self.player.health.max(0),
            enemy_count: self.enemies.len(),
            score: self.score,
        }
    }
}
