//! Paddle Rush - a paddle arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic frame simulation (movement, bouncing, collisions, scoring)
//! - `config`: Variant presets and gameplay tunables
//! - `session`: Frame driver glue (owns the state, persists the high score)
//! - `persistence`: Key-value store backends
//! - `platform`: Keyboard mapping and the browser binding
//! - `snapshot`: Render/HUD view handed to the display layer

pub mod color;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod snapshot;

pub use color::Rgb;
pub use config::{SimConfig, Variant};
pub use highscores::HighScore;
pub use session::Session;
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;

    /// Paddle defaults - starts centered, resting near the bottom edge
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    /// Displacement per frame while a direction is held (not scaled by dt)
    pub const PADDLE_STEP: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START_X: f32 = 512.0;
    pub const BALL_START_Y: f32 = 20.0;
    pub const BALL_START_VEL_X: f32 = 200.0;
    pub const BALL_START_VEL_Y: f32 = 150.0;
    /// Per-component velocity cap after a speed-up
    pub const BALL_SPEED_CAP: f32 = 500.0;

    /// Hazard (star) defaults
    pub const HAZARD_SIZE: f32 = 48.0;
    pub const HAZARD_START_X: f32 = 100.0;
    pub const HAZARD_START_Y: f32 = 100.0;
    pub const HAZARD_START_VEL_X: f32 = 160.0;
    pub const HAZARD_START_VEL_Y: f32 = 120.0;
    pub const HAZARD_SPEED_CAP: f32 = 600.0;
    pub const HAZARD_DAMAGE: i32 = 20;

    /// Multiplicative speed-up on hit
    pub const SPEED_GROWTH: f32 = 1.05;

    /// Rewards
    pub const BALL_HIT_REWARD: u64 = 10;
    pub const COLLECTIBLE_REWARD: u64 = 2000;

    /// Health
    pub const MAX_HEALTH: i32 = 100;
    pub const HEALTH_BAR_MAX_WIDTH: f32 = 800.0;

    /// Collectible defaults
    pub const COLLECTIBLE_SIZE: f32 = 40.0;
    pub const COLLECTIBLE_TARGET_COUNT: usize = 3;
    pub const COLLECTIBLE_FALL_SPEED: f32 = 100.0;
    pub const COLLECTIBLE_LIFETIME_MS: f64 = 5000.0;
    pub const COLLECTIBLE_SPAWN_INTERVAL_MS: f64 = 3000.0;
    pub const COLLECTIBLE_MAX_LIVE: usize = 5;
    /// Resample budget when a spawn position lands on the paddle
    pub const SPAWN_ATTEMPTS: u32 = 32;

    /// Largest frame delta a host driver should feed the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}
