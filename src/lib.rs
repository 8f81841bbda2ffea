//! Paddle Duel - A two-player keyboard Pong game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, input, collisions, tick)
//! - `session`: Start/restart control over a tick source and score display
//! - `renderer`: Draw-command frames and the WebGPU pipeline
//! - `config`: Data-driven game setup (arena, paddles, keys, palette)

pub mod config;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, KeyBindings, Palette};
pub use session::{Session, SessionError};

/// Default game configuration constants
pub mod consts {
    /// Fixed tick interval in milliseconds (~50 Hz)
    pub const TICK_INTERVAL_MS: u32 = 20;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Distance a paddle moves per key press
    pub const PADDLE_STEP: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 13.0;
    /// Distance travelled per tick along each axis at launch
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Speed boost when ball hits a paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.07;

    /// Triangle fan resolution for the ball
    pub const CIRCLE_SEGMENTS: u32 = 32;
}

/// Convert an `0xRRGGBB` value to normalized RGBA
#[inline]
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}
