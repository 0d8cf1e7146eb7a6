//! Runtime configuration loaded from a TOML file.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! file only needs the keys it wants to override:
//!
//! ```toml
//! max_lives = 3
//! item_drop_chance = 0.5
//! ```

use std::fmt;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::constants::*;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ─────────────────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub fps: u32,
    pub scroll_speed: f32,
    pub enemy_spawn_interval: f32,

    // ── Progression ───────────────────────────────────────────────────────────
    pub max_level: u32,
    pub max_lives: u32,
    pub level_transition_ms: u64,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub shoot_cooldown_ms: u64,
    pub invulnerability_ms: u64,

    // ── Items ─────────────────────────────────────────────────────────────────
    pub item_drop_chance: f64,
    pub item_lifetime_ms: u64,
    pub power_duration_min_ms: u64,
    pub power_duration_max_ms: u64,

    // ── Logging ───────────────────────────────────────────────────────────────
    pub log_file: String,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            fps: FPS,
            scroll_speed: SCROLL_SPEED,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            max_level: MAX_LEVEL,
            max_lives: MAX_LIVES,
            level_transition_ms: LEVEL_TRANSITION_MS,
            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            invulnerability_ms: INVULNERABILITY_MS,
            item_drop_chance: ITEM_DROP_CHANCE,
            item_lifetime_ms: ITEM_LIFETIME_MS,
            power_duration_min_ms: POWER_DURATION_MIN_MS,
            power_duration_max_ms: POWER_DURATION_MAX_MS,
            log_file: "scroll_shooter.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid TOML or has mistyped keys.
    Parse(toml::de::Error),
    /// A value parsed fine but is outside its usable range.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse config: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`.  A missing file is not an error: the defaults are used.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}; using compiled defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("scroll_speed", self.scroll_speed),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_spawn_interval", self.enemy_spawn_interval),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        // Bullets are only culled once they leave through the top edge.
        if self.bullet_speed >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "bullet_speed",
                reason: "must be negative (bullets travel upward)",
            });
        }
        for (field, value) in [
            ("scroll_speed", self.scroll_speed),
            ("player_speed", self.player_speed),
            ("enemy_spawn_interval", self.enemy_spawn_interval),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        // The widest sprite row is the player plus the enemy spawn band.
        if self.viewport_width < PLAYER_WIDTH + ENEMY_SPAWN_X_MARGIN as f32 {
            return Err(ConfigError::Invalid {
                field: "viewport_width",
                reason: "too narrow for the player ship and spawn band",
            });
        }
        if self.viewport_height < PLAYER_HEIGHT * 2.0 {
            return Err(ConfigError::Invalid {
                field: "viewport_height",
                reason: "must be at least twice the player ship height",
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be positive",
            });
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid {
                field: "max_level",
                reason: "must be at least 1",
            });
        }
        if self.max_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "max_lives",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.item_drop_chance) {
            return Err(ConfigError::Invalid {
                field: "item_drop_chance",
                reason: "must lie in [0, 1]",
            });
        }
        if self.power_duration_min_ms > self.power_duration_max_ms {
            return Err(ConfigError::Invalid {
                field: "power_duration_min_ms",
                reason: "must not exceed power_duration_max_ms",
            });
        }
        Ok(())
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
