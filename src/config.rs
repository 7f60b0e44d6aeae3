//! Gameplay configuration and variant presets
//!
//! Every tunable the simulator reads lives in [`SimConfig`]. The four
//! [`Variant`] presets reproduce the successive iterations of the scene;
//! JSON overrides are layered on top with `#[serde(default)]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::*;

/// Scene iteration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Ball and paddle only; the first click ends the session
    Classic,
    /// Star hazard, health, WASD, high score, presents that expire
    #[default]
    Survival,
    /// Falling triangles kept topped up to a target count
    Cascade,
    /// Collectibles spawned on a repeating timer, each with a lifetime
    Timed,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Survival,
        Variant::Cascade,
        Variant::Timed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Survival => "survival",
            Variant::Cascade => "cascade",
            Variant::Timed => "timed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "v1" => Some(Variant::Classic),
            "survival" | "v2" => Some(Variant::Survival),
            "cascade" | "falling" => Some(Variant::Cascade),
            "timed" | "v3" => Some(Variant::Timed),
            _ => None,
        }
    }
}

/// When a contact (ball or star against the paddle) triggers its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    /// Respond on every frame the boxes overlap
    #[default]
    EveryFrame,
    /// Respond once when an overlap begins
    OnOnset,
}

/// What ends a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPolicy {
    /// First pointer/click input, regardless of gameplay
    FirstPointer,
    /// Health reaching zero
    #[default]
    HealthDepleted,
}

/// Paddle fill when the ball is not touching it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaddlePalette {
    Fixed { color: Rgb },
    /// Blend from `damaged` at zero health to `healthy` at full health
    HealthBlend { healthy: Rgb, damaged: Rgb },
}

impl PaddlePalette {
    pub fn color_for(&self, health: i32, max_health: i32) -> Rgb {
        match *self {
            PaddlePalette::Fixed { color } => color,
            PaddlePalette::HealthBlend { healthy, damaged } => {
                let t = if max_health > 0 {
                    health as f32 / max_health as f32
                } else {
                    0.0
                };
                damaged.lerp(healthy, t)
            }
        }
    }
}

/// Collectible lifetime strategy, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectiblePolicy {
    None,
    /// `count` spawned at start, each removed after `lifetime_ms` if uncollected
    Expiring { count: usize, lifetime_ms: f64 },
    /// Descend at `fall_speed` units/s, leave at the bottom, topped up to `target_count`
    Falling { target_count: usize, fall_speed: f32 },
    /// One spawn every `interval_ms` while fewer than `max_live` are alive
    Periodic {
        interval_ms: f64,
        lifetime_ms: Option<f64>,
        max_live: usize,
    },
}

impl CollectiblePolicy {
    /// Expiry delay attached to each spawned collectible, if any
    pub fn lifetime_ms(&self) -> Option<f64> {
        match *self {
            CollectiblePolicy::Expiring { lifetime_ms, .. } => Some(lifetime_ms),
            CollectiblePolicy::Periodic { lifetime_ms, .. } => lifetime_ms,
            CollectiblePolicy::None | CollectiblePolicy::Falling { .. } => None,
        }
    }
}

/// The roaming star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub size: Vec2,
    pub start_pos: Vec2,
    pub start_vel: Vec2,
    /// Health lost per contact
    pub damage: i32,
    pub speed_cap: f32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(HAZARD_SIZE),
            start_pos: Vec2::new(HAZARD_START_X, HAZARD_START_Y),
            start_vel: Vec2::new(HAZARD_START_VEL_X, HAZARD_START_VEL_Y),
            damage: HAZARD_DAMAGE,
            speed_cap: HAZARD_SPEED_CAP,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport width/height
    pub viewport: Vec2,

    // === Paddle ===
    pub paddle_size: Vec2,
    pub paddle_start: Vec2,
    /// Per-frame displacement
    pub paddle_step: f32,
    /// OR WASD into the arrow keys
    pub wasd_enabled: bool,
    pub palette: PaddlePalette,
    pub hit_color: Rgb,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start: Vec2,
    pub ball_start_vel: Vec2,
    pub ball_speed_cap: f32,

    // === Hazard ===
    pub hazard: Option<HazardConfig>,

    // === Scoring ===
    pub ball_hit_reward: u64,
    pub collectible_reward: u64,
    /// Grow ball/star velocity on hits
    pub speed_up: bool,
    pub speed_growth: f32,
    pub contact: ContactPolicy,

    // === Health ===
    pub max_health: i32,
    pub health_bar_max_width: f32,
    pub terminal: TerminalPolicy,

    // === Collectibles ===
    pub collectibles: CollectiblePolicy,
    pub collectible_size: Vec2,
    pub spawn_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl SimConfig {
    /// Baseline shared by every preset (the classic scene)
    fn base() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_start: Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT - PADDLE_BOTTOM_OFFSET),
            paddle_step: PADDLE_STEP,
            wasd_enabled: false,
            palette: PaddlePalette::Fixed { color: Rgb::ORANGE },
            hit_color: Rgb::BLUE,
            ball_radius: BALL_RADIUS,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_start_vel: Vec2::new(BALL_START_VEL_X, BALL_START_VEL_Y),
            ball_speed_cap: BALL_SPEED_CAP,
            hazard: None,
            ball_hit_reward: BALL_HIT_REWARD,
            collectible_reward: COLLECTIBLE_REWARD,
            speed_up: false,
            speed_growth: SPEED_GROWTH,
            contact: ContactPolicy::EveryFrame,
            max_health: MAX_HEALTH,
            health_bar_max_width: HEALTH_BAR_MAX_WIDTH,
            terminal: TerminalPolicy::FirstPointer,
            collectibles: CollectiblePolicy::None,
            collectible_size: Vec2::splat(COLLECTIBLE_SIZE),
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }

    /// Build the configuration for a preset
    pub fn for_variant(variant: Variant) -> Self {
        let mut config = Self::base();
        if variant == Variant::Classic {
            return config;
        }

        // Everything after the classic scene shares the survival core
        config.wasd_enabled = true;
        config.palette = PaddlePalette::HealthBlend {
            healthy: Rgb::GREEN,
            damaged: Rgb::RED,
        };
        config.hazard = Some(HazardConfig::default());
        config.speed_up = true;
        config.terminal = TerminalPolicy::HealthDepleted;

        config.collectibles = match variant {
            Variant::Classic | Variant::Survival => CollectiblePolicy::Expiring {
                count: COLLECTIBLE_TARGET_COUNT,
                lifetime_ms: COLLECTIBLE_LIFETIME_MS,
            },
            Variant::Cascade => CollectiblePolicy::Falling {
                target_count: COLLECTIBLE_TARGET_COUNT,
                fall_speed: COLLECTIBLE_FALL_SPEED,
            },
            Variant::Timed => CollectiblePolicy::Periodic {
                interval_ms: COLLECTIBLE_SPAWN_INTERVAL_MS,
                lifetime_ms: Some(COLLECTIBLE_LIFETIME_MS),
                max_live: COLLECTIBLE_MAX_LIVE,
            },
        };
        config
    }

    /// Parse a JSON override; omitted fields take the survival defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Health bar width for a health value (`max_width * health / max_health`)
    pub fn health_bar_width(&self, health: i32) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health_bar_max_width * health as f32 / self.max_health as f32
    }

    /// Paddle color when nothing is touching it
    pub fn paddle_color(&self, health: i32) -> Rgb {
        self.palette.color_for(health, self.max_health)
    }
}
