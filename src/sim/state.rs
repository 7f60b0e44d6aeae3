//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in [`GameState`], which is
//! exclusively owned by whoever drives the simulation.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use super::timer::{TimerAction, TimerHandle, TimerQueue};
use crate::color::Rgb;
use crate::config::{CollectiblePolicy, SimConfig};

/// Session phase. `Terminal` is entered once and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Playing,
    Terminal,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

impl Paddle {
    pub fn half_extent(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}

/// The roaming star
#[derive(Debug, Clone)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Hazard {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Collectible shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Present,
    Triangle,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Collectible {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub hazard: Option<Hazard>,
    /// Live collectibles, in spawn order
    pub collectibles: Vec<Collectible>,
    pub score: u64,
    pub health: i32,
    pub health_bar_width: f32,
    /// Best score known to this session (loaded + improved)
    pub high_score: u64,
    pub timers: TimerQueue,
    /// Expiry timer per live collectible id
    pub expiry_timers: BTreeMap<u32, TimerHandle>,
    /// Repeating spawn trigger for the periodic policy
    pub spawn_timer: Option<TimerHandle>,
    /// Whether the ball overlapped the paddle last frame
    pub ball_contact: bool,
    /// Whether the star overlapped the paddle last frame
    pub hazard_contact: bool,
    pub frame_count: u64,
    pub elapsed_secs: f64,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session: paddle, ball and star immediately, collectibles
    /// according to the configured policy.
    pub fn new(config: SimConfig, seed: u64, high_score: u64) -> Self {
        let health = config.max_health;
        let paddle = Paddle {
            pos: config.paddle_start,
            size: config.paddle_size,
            color: config.paddle_color(health),
        };
        let ball = Ball {
            pos: config.ball_start,
            vel: config.ball_start_vel,
            radius: config.ball_radius,
        };
        let hazard = config.hazard.map(|h| Hazard {
            pos: h.start_pos,
            vel: h.start_vel,
            size: h.size,
        });

        let mut state = Self {
            health_bar_width: config.health_bar_width(health),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Playing,
            paddle,
            ball,
            hazard,
            collectibles: Vec::new(),
            score: 0,
            health,
            high_score,
            timers: TimerQueue::new(),
            expiry_timers: BTreeMap::new(),
            spawn_timer: None,
            ball_contact: false,
            hazard_contact: false,
            frame_count: 0,
            elapsed_secs: 0.0,
            next_id: 1,
        };

        match state.config.collectibles {
            CollectiblePolicy::None => {}
            CollectiblePolicy::Expiring { count, .. } => {
                for _ in 0..count {
                    state.spawn_random(CollectibleKind::Present);
                }
            }
            CollectiblePolicy::Falling { target_count, .. } => {
                for _ in 0..target_count {
                    state.spawn_random(CollectibleKind::Triangle);
                }
            }
            CollectiblePolicy::Periodic { interval_ms, .. } => {
                let handle = state
                    .timers
                    .schedule_repeating(interval_ms, TimerAction::SpawnCollectible);
                state.spawn_timer = Some(handle);
            }
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Paddle color when the ball is not touching it
    pub fn default_paddle_color(&self) -> Rgb {
        self.config.paddle_color(self.health)
    }

    /// Add a collectible at `pos`, attaching an expiry timer when the policy
    /// gives collectibles a lifetime. Returns the new id.
    pub fn spawn_collectible(&mut self, kind: CollectibleKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.collectibles.push(Collectible {
            id,
            kind,
            pos,
            size: self.config.collectible_size,
        });
        if let Some(lifetime) = self.config.collectibles.lifetime_ms() {
            let handle = self
                .timers
                .schedule_once(lifetime, TimerAction::ExpireCollectible(id));
            self.expiry_timers.insert(id, handle);
        }
        log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
        id
    }

    /// Spawn at a random in-bounds position clear of the paddle.
    /// Returns `None` when every attempt landed on the paddle.
    pub fn spawn_random(&mut self, kind: CollectibleKind) -> Option<u32> {
        let pos = self.random_spawn_position()?;
        Some(self.spawn_collectible(kind, pos))
    }

    /// Reject-and-resample: a position whose box would overlap the paddle is
    /// discarded, up to `spawn_attempts` tries.
    pub fn random_spawn_position(&mut self) -> Option<Vec2> {
        let half = self.config.collectible_size * 0.5;
        let viewport = self.config.viewport;
        let paddle = self.paddle.bounds();

        for _ in 0..self.config.spawn_attempts.max(1) {
            let pos = Vec2::new(
                random_between(&mut self.rng, half.x, viewport.x - half.x),
                random_between(&mut self.rng, half.y, viewport.y - half.y),
            );
            if !Aabb::from_center(pos, self.config.collectible_size).intersects(&paddle) {
                return Some(pos);
            }
        }
        log::debug!("No spawn position clear of the paddle");
        None
    }

    /// Position just above the top edge at a random x, for falling respawns
    pub fn random_drop_position(&mut self) -> Vec2 {
        let half = self.config.collectible_size * 0.5;
        let x = random_between(&mut self.rng, half.x, self.config.viewport.x - half.x);
        Vec2::new(x, -half.y)
    }

    /// Remove the collectible at `index` together with its expiry timer
    pub fn remove_collectible_at(&mut self, index: usize) -> Collectible {
        let collectible = self.collectibles.remove(index);
        if let Some(handle) = self.expiry_timers.remove(&collectible.id) {
            self.timers.cancel(handle);
        }
        collectible
    }

    /// Remove by id; `None` if it is already gone
    pub fn remove_collectible(&mut self, id: u32) -> Option<Collectible> {
        let index = self.collectibles.iter().position(|c| c.id == id)?;
        Some(self.remove_collectible_at(index))
    }
}

/// Uniform sample in `[lo, hi]`; the midpoint when the range is empty
fn random_between(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) * 0.5
    }
}
