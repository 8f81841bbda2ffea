//! Game configuration
//!
//! Everything that shapes a match (arena, paddles, ball, keys, colors) is
//! data. Defaults match the classic browser layout.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::rgb;

/// Configuration problems found while parsing or validating
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("arena {width}x{height} cannot fit paddles of {paddle_width}x{paddle_height}")]
    PaddleTooLarge {
        width: f32,
        height: f32,
        paddle_width: f32,
        paddle_height: f32,
    },
    #[error("ball radius {radius} too large for arena height {height}")]
    BallTooLarge { radius: f32, height: f32 },
    #[error("speed growth factor must be >= 1.0 (got {0})")]
    ShrinkingSpeed(f32),
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
    #[error("key {0:?} is bound to more than one paddle action")]
    DuplicateKey(String),
}

/// Key identifiers (as reported by `KeyboardEvent.key`) for each paddle action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "w".to_string(),
            left_down: "s".to_string(),
            right_up: "ArrowUp".to_string(),
            right_down: "ArrowDown".to_string(),
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [&str; 4] {
        [
            self.left_up.as_str(),
            self.left_down.as_str(),
            self.right_up.as_str(),
            self.right_down.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let keys = self.all();
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(ConfigError::DuplicateKey(key.to_string()));
            }
        }
        Ok(())
    }
}

/// Fill colors (normalized RGBA)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub board: [f32; 4],
    pub ball: [f32; 4],
    pub left_paddle: [f32; 4],
    pub right_paddle: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            board: rgb(0x90ee90),        // lightgreen
            ball: rgb(0xdc143c),         // crimson
            left_paddle: rgb(0x8b0000),  // darkred
            right_paddle: rgb(0x00bfff), // deepskyblue
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Units moved per key press
    pub paddle_step: f32,
    pub ball_radius: f32,
    /// Initial ball speed (units per tick along each axis)
    pub ball_start_speed: f32,
    /// Speed multiplier applied on every paddle hit
    pub speed_growth: f32,
    pub tick_interval_ms: u32,
    pub keys: KeyBindings,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            speed_growth: PADDLE_BOOST,
            tick_interval_ms: TICK_INTERVAL_MS,
            keys: KeyBindings::default(),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Environment variable naming a JSON config file (native only)
    pub const ENV_PATH: &'static str = "PADDLE_DUEL_CONFIG";

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check the geometry invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_radius", self.ball_radius),
            ("ball_start_speed", self.ball_start_speed),
        ];
        for (field, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.arena_width <= 2.0 * self.paddle_width || self.arena_height < self.paddle_height {
            return Err(ConfigError::PaddleTooLarge {
                width: self.arena_width,
                height: self.arena_height,
                paddle_width: self.paddle_width,
                paddle_height: self.paddle_height,
            });
        }

        if 2.0 * self.ball_radius >= self.arena_height {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                height: self.arena_height,
            });
        }

        if !(self.speed_growth >= 1.0) {
            return Err(ConfigError::ShrinkingSpeed(self.speed_growth));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        self.keys.validate()
    }

    /// Load config from the file named by `PADDLE_DUEL_CONFIG`, or use defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config '{}': {}", path, e);
                Self::default()
            }
        }
    }

    /// Tick interval as a `Duration`
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.tick_interval_ms))
    }
}
