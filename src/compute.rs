//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the config and, where needed, an RNG handle) and returns
//! a brand-new `GameState`.  Side effects are limited to the injected RNG and
//! log output.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{AttackEffect, Enemy, GameState, HudValues, Player};
use crate::input::{InputState, MoveKey};

/// Result of one simulated tick.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: GameState,
    pub hud: HudValues,
    /// True only on the tick that ended the game.
    pub game_over: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a canvas of the given size.  The player
/// starts in the middle.
pub fn init_state(config: &GameConfig, width: f32, height: f32) -> GameState {
    GameState {
        player: Player::new(width / 2.0, height / 2.0, config),
        enemies: Vec::new(),
        effects: Vec::new(),
        score: 0,
        running: true,
        is_over: false,
        spawn_timer: 0,
        frame: 0,
        width,
        height,
    }
}

/// Change the canvas size, e.g. after the host surface was resized.  Entities
/// keep their positions; the player is clamped back inside on the next tick.
pub fn resize(state: &GameState, width: f32, height: f32) -> GameState {
    GameState {
        width,
        height,
        ..state.clone()
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    (bx - ax).hypot(by - ay)
}

/// Keep a sprite of `size` fully inside `[0, extent]`.  A canvas narrower than
/// the sprite pins it to the centre.
fn clamp_axis(pos: f32, size: f32, extent: f32) -> f32 {
    let half = size / 2.0;
    if extent < size {
        extent / 2.0
    } else {
        pos.clamp(half, extent - half)
    }
}

// ── Player-triggered action ──────────────────────────────────────────────────

/// Swing at everything around the player.
///
/// Ignored while the cooldown is running or once the game is over.  Enemies
/// brought to zero health stay in the live set until the next tick sweeps
/// them out and awards the score, so each kill is counted exactly once.
pub fn perform_attack(state: &GameState, config: &GameConfig) -> GameState {
    if !state.running || state.player.attack_cooldown > 0 {
        return state.clone();
    }

    let p = &state.player;
    let mut effects = state.effects.clone();
    effects.push(AttackEffect {
        x: p.x,
        y: p.y,
        angle: p.angle,
        size: config.attack.effect_size,
        elapsed: 0,
        duration: config.attack.effect_duration,
    });

    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            if distance(p.x, p.y, e.x, e.y) < config.attack.range {
                Enemy {
                    health: e.health - config.attack.damage,
                    ..e.clone()
                }
            } else {
                e.clone()
            }
        })
        .collect();

    let hits = enemies
        .iter()
        .zip(&state.enemies)
        .filter(|(after, before)| after.health != before.health)
        .count();
    debug!(hits, "attack");

    GameState {
        player: Player {
            attacking: true,
            attack_cooldown: config.attack.cooldown,
            ..p.clone()
        },
        enemies,
        effects,
        ..state.clone()
    }
}

// ── Per-tick update (nearly pure: RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
///
/// Once the game is over this returns an unchanged copy.
pub fn tick(
    state: &GameState,
    input: &InputState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> TickOutcome {
    if !state.running {
        return TickOutcome {
            state: state.clone(),
            hud: state.hud(),
            game_over: false,
        };
    }

    // ── 1. Player movement ───────────────────────────────────────────────────
    let mut player = move_player(&state.player, input, state.width, state.height, config);

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer >= config.spawn.interval && enemies.len() < config.spawn.max_enemies {
        let enemy = spawn_enemy(state.width, state.height, config, rng);
        debug!(x = enemy.x, y = enemy.y, live = enemies.len() + 1, "enemy spawned");
        enemies.push(enemy);
        spawn_timer = 0;
    }

    // ── 3. Enemies chase and bite ────────────────────────────────────────────
    for enemy in &mut enemies {
        let dx = player.x - enemy.x;
        let dy = player.y - enemy.y;
        let dist = dx.hypot(dy);

        if dist > 0.0 {
            enemy.x += dx / dist * enemy.speed;
            enemy.y += dy / dist * enemy.speed;
        }

        if dist < config.enemy.contact_range && enemy.damage_timer <= 0 {
            player.health -= config.enemy.contact_damage;
            enemy.damage_timer = config.enemy.damage_interval;
        }

        if enemy.damage_timer > 0 {
            enemy.damage_timer -= 1;
        }
    }

    let before = enemies.len();
    enemies.retain(|e| !e.is_dead());
    let kills = (before - enemies.len()) as u32;
    if kills > 0 {
        debug!(kills, "enemies killed");
    }
    let score = state.score + kills * config.enemy.kill_score;

    // ── 4. Effects ───────────────────────────────────────────────────────────
    let effects: Vec<AttackEffect> = state
        .effects
        .iter()
        .map(|fx| AttackEffect {
            elapsed: fx.elapsed + 1,
            ..fx.clone()
        })
        .filter(|fx| !fx.is_expired())
        .collect();

    // ── 5. Attack cooldown ───────────────────────────────────────────────────
    if player.attack_cooldown > 0 {
        player.attack_cooldown -= 1;
    }

    // ── 6. Game over ─────────────────────────────────────────────────────────
    let game_over = player.health <= 0 && !state.is_over;
    if game_over {
        info!(score, frame = state.frame + 1, "game over");
    }

    let next = GameState {
        player,
        enemies,
        effects,
        score,
        running: !game_over,
        is_over: state.is_over || game_over,
        spawn_timer,
        frame: state.frame + 1,
        ..state.clone()
    };

    // ── 7. HUD ───────────────────────────────────────────────────────────────
    TickOutcome {
        hud: next.hud(),
        state: next,
        game_over,
    }
}

/// Keyboard sets per-axis velocity; pointer-follow, when the pointer is far
/// enough away, overwrites it and turns the player to face the pointer.
fn move_player(
    player: &Player,
    input: &InputState,
    width: f32,
    height: f32,
    config: &GameConfig,
) -> Player {
    let mut vx = 0.0;
    let mut vy = 0.0;
    let mut angle = player.angle;

    if input.is_held(MoveKey::Up) {
        vy = -player.speed;
    }
    if input.is_held(MoveKey::Down) {
        vy = player.speed;
    }
    if input.is_held(MoveKey::Left) {
        vx = -player.speed;
    }
    if input.is_held(MoveKey::Right) {
        vx = player.speed;
    }

    let dx = input.pointer_x - player.x;
    let dy = input.pointer_y - player.y;
    let dist = dx.hypot(dy);
    if dist > config.player.follow_threshold {
        vx = dx / dist * player.speed;
        vy = dy / dist * player.speed;
        angle = dy.atan2(dx);
    }

    Player {
        x: clamp_axis(player.x + vx, player.width, width),
        y: clamp_axis(player.y + vy, player.height, height),
        vx,
        vy,
        angle,
        ..player.clone()
    }
}

/// A fresh enemy just outside a random canvas edge.
fn spawn_enemy(width: f32, height: f32, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let offset = config.spawn.edge_offset;
    let (x, y) = match rng.gen_range(0..4) {
        0 => (rng.gen::<f32>() * width, -offset),
        1 => (rng.gen::<f32>() * width, height + offset),
        2 => (-offset, rng.gen::<f32>() * height),
        _ => (width + offset, rng.gen::<f32>() * height),
    };
    Enemy::new(x, y, config)
}
