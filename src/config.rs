//! Tunable game constants.
//!
//! Every field defaults to the value the game ships with, so an empty TOML
//! file (or no file at all) yields the stock game.  Any subset of fields may
//! be overridden, e.g.
//!
//! ```toml
//! [spawn]
//! interval = 120
//! max_enemies = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::GameError;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Canvas units moved per tick.
    pub speed: f32,
    pub max_health: i32,
    /// Pointer-follow only kicks in beyond this distance.
    pub follow_threshold: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            speed: 4.0,
            max_health: 100,
            follow_threshold: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub max_health: i32,
    pub contact_range: f32,
    pub contact_damage: i32,
    /// Ticks between two contact hits from the same enemy.
    pub damage_interval: i32,
    pub kill_score: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            speed: 1.5,
            max_health: 30,
            contact_range: 30.0,
            contact_damage: 5,
            damage_interval: 30,
            kill_score: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    /// Ticks between spawns (360 ≈ 6 s at 60 ticks/s).
    pub interval: u32,
    pub max_enemies: usize,
    /// Distance outside the canvas edge at which enemies appear.
    pub edge_offset: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval: 360,
            max_enemies: 6,
            edge_offset: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttackConfig {
    pub cooldown: i32,
    pub range: f32,
    pub damage: i32,
    pub effect_duration: u32,
    pub effect_size: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            cooldown: 20,
            range: 100.0,
            damage: 25,
            effect_duration: 15,
            effect_size: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Upper bound on frames presented per second.
    pub render_fps: u32,
    pub max_ticks_per_frame: u32,
    /// Real time longer than this between two frames is treated as a stall.
    pub max_frame_delta_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            render_fps: 30,
            max_ticks_per_frame: 5,
            max_frame_delta_ms: 250,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Canvas units covered by one terminal column.
    pub cell_width: f32,
    /// Canvas units covered by one terminal row (two raster pixels).
    pub cell_height: f32,
    pub assets_dir: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: 12.0,
            cell_height: 24.0,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub attack: AttackConfig,
    #[serde(rename = "loop")]
    pub pacing: LoopConfig,
    pub display: DisplayConfig,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let raw = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw, path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, GameError> {
        Self::parse(raw, Path::new("<inline>"))
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, GameError> {
        let config: Self = toml::from_str(raw).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.pacing.tick_rate == 0 {
            return Err(GameError::InvalidConfig("loop.tick_rate must be > 0".into()));
        }
        if self.pacing.render_fps == 0 {
            return Err(GameError::InvalidConfig("loop.render_fps must be > 0".into()));
        }
        if self.pacing.max_ticks_per_frame == 0 {
            return Err(GameError::InvalidConfig(
                "loop.max_ticks_per_frame must be > 0".into(),
            ));
        }
        if !(self.display.cell_width > 0.0 && self.display.cell_height > 0.0) {
            return Err(GameError::InvalidConfig(
                "display.cell_width and display.cell_height must be > 0".into(),
            ));
        }
        if self.attack.effect_duration == 0 {
            return Err(GameError::InvalidConfig(
                "attack.effect_duration must be > 0".into(),
            ));
        }
        Ok(())
    }
}
