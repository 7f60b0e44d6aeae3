//! Deterministic frame simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Timed effects go through the sim-owned timer queue
//! - Stable iteration order (spawn order)
//! - No rendering, input polling or storage dependencies

pub mod collision;
pub mod frame;
pub mod state;
pub mod timer;

pub use collision::Aabb;
pub use frame::{Directions, FrameInput, FrameReport, GameEvent, advance};
pub use state::{Ball, Collectible, CollectibleKind, GameState, Hazard, Paddle, SessionPhase};
pub use timer::{TimerAction, TimerHandle, TimerQueue};
