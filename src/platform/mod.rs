//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard/pointer input mapping
//! - The wasm-bindgen session handle (browser only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Direction, InputState, KeyBinding, KeySource};

use crate::consts::MAX_FRAME_DT;

/// Host frame delta in milliseconds to simulation seconds.
///
/// Negative, NaN or infinite deltas count as zero; long stalls (tab in the
/// background) are capped at [`MAX_FRAME_DT`].
pub fn frame_seconds(delta_ms: f64) -> f32 {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        ((delta_ms / 1000.0) as f32).min(MAX_FRAME_DT)
    } else {
        0.0
    }
}
