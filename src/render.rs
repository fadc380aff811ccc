//! Rendering layer: translates a `GameState` into draw calls on a `Surface`.
//!
//! No game logic is performed and the state is never mutated; draw order is
//! the z-order (background, enemies, player, attack effects).

use std::path::Path;

use tracing::{info, warn};

use crate::entities::{AttackEffect, Enemy, GameState, Player};
use crate::error::GameError;

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Decoded RGBA image, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Sprite {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let bytes = std::fs::read(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| GameError::AssetDecode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Sprite {
            name,
            width: image.width(),
            height: image.height(),
            pixels: image
                .pixels()
                .map(|p| Rgba {
                    r: p[0],
                    g: p[1],
                    b: p[2],
                    a: p[3],
                })
                .collect(),
        })
    }

    /// Single-colour sprite; handy as a placeholder.
    pub fn solid(name: &str, width: u32, height: u32, color: Rgba) -> Self {
        Sprite {
            name: name.to_string(),
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// The four images the game draws.  Any of them may be missing.
#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub player: Option<Sprite>,
    pub enemy: Option<Sprite>,
    pub attack: Option<Sprite>,
    pub background: Option<Sprite>,
}

impl Assets {
    /// Load `player.png`, `enemy.png`, `attack.png` and `background.png` from
    /// `dir`.  A file that cannot be read or decoded is logged and left
    /// unloaded.
    pub fn load(dir: &Path) -> Self {
        let load = |file: &str| match Sprite::load(&dir.join(file)) {
            Ok(sprite) => {
                info!(file, width = sprite.width, height = sprite.height, "sprite loaded");
                Some(sprite)
            }
            Err(err) => {
                warn!(file, %err, "sprite not loaded, using fallback");
                None
            }
        };
        Assets {
            player: load("player.png"),
            enemy: load("enemy.png"),
            attack: load("attack.png"),
            background: load("background.png"),
        }
    }
}

/// A 2D raster target: filled rectangles and rotated, translucent blits.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw `sprite` stretched to `size`, centred on `center`, rotated by
    /// `angle` radians about its centre, at opacity `alpha`.
    fn draw_sprite(
        &mut self,
        sprite: &Sprite,
        center: (f32, f32),
        size: (f32, f32),
        angle: f32,
        alpha: f32,
    );
}

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgba = Rgba::rgb(0x2a, 0x5f, 0x2a);
pub const C_BAR_BACK: Rgba = Rgba::rgb(255, 0, 0);
pub const C_BAR_FRONT: Rgba = Rgba::rgb(0, 128, 0);

const BAR_OFFSET: f32 = 10.0;
const BAR_HEIGHT: f32 = 5.0;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<S: Surface>(surface: &mut S, state: &GameState, assets: &Assets) {
    draw_background(surface, state, assets);

    for enemy in &state.enemies {
        draw_enemy(surface, enemy, assets);
    }

    draw_player(surface, &state.player, assets);

    for effect in &state.effects {
        draw_effect(surface, effect, assets);
    }
}

fn draw_background<S: Surface>(surface: &mut S, state: &GameState, assets: &Assets) {
    match &assets.background {
        Some(bg) => surface.draw_sprite(
            bg,
            (state.width / 2.0, state.height / 2.0),
            (state.width, state.height),
            0.0,
            1.0,
        ),
        None => surface.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                w: state.width,
                h: state.height,
            },
            C_BACKGROUND,
        ),
    }
}

/// Red backdrop with a green fill proportional to remaining health, just
/// above the sprite.  Never rotated.
fn draw_health_bar<S: Surface>(
    surface: &mut S,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fraction: f32,
) {
    let left = x - width / 2.0;
    let top = y - height / 2.0 - BAR_OFFSET;
    surface.fill_rect(
        Rect {
            x: left,
            y: top,
            w: width,
            h: BAR_HEIGHT,
        },
        C_BAR_BACK,
    );
    surface.fill_rect(
        Rect {
            x: left,
            y: top,
            w: fraction.clamp(0.0, 1.0) * width,
            h: BAR_HEIGHT,
        },
        C_BAR_FRONT,
    );
}

fn draw_enemy<S: Surface>(surface: &mut S, enemy: &Enemy, assets: &Assets) {
    if let Some(sprite) = &assets.enemy {
        surface.draw_sprite(sprite, (enemy.x, enemy.y), (enemy.width, enemy.height), 0.0, 1.0);
    }
    draw_health_bar(
        surface,
        enemy.x,
        enemy.y,
        enemy.width,
        enemy.height,
        enemy.health as f32 / enemy.max_health as f32,
    );
}

fn draw_player<S: Surface>(surface: &mut S, player: &Player, assets: &Assets) {
    if let Some(sprite) = &assets.player {
        surface.draw_sprite(
            sprite,
            (player.x, player.y),
            (player.width, player.height),
            player.angle,
            1.0,
        );
    }
    draw_health_bar(
        surface,
        player.x,
        player.y,
        player.width,
        player.height,
        player.health as f32 / player.max_health as f32,
    );
}

fn draw_effect<S: Surface>(surface: &mut S, effect: &AttackEffect, assets: &Assets) {
    if let Some(sprite) = &assets.attack {
        surface.draw_sprite(
            sprite,
            (effect.x, effect.y),
            (effect.size, effect.size),
            effect.angle,
            effect.opacity(),
        );
    }
}
