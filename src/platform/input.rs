//! Keyboard and pointer input
//!
//! Maps DOM `KeyboardEvent.code` values onto the two directional bindings
//! and latches one-shot pointer presses until the next frame consumes them.

use crate::sim::{Directions, FrameInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Arrows,
    Wasd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A physical key bound to a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub source: KeySource,
    pub direction: Direction,
}

impl KeyBinding {
    pub fn from_code(code: &str) -> Option<Self> {
        let (source, direction) = match code {
            "ArrowUp" => (KeySource::Arrows, Direction::Up),
            "ArrowDown" => (KeySource::Arrows, Direction::Down),
            "ArrowLeft" => (KeySource::Arrows, Direction::Left),
            "ArrowRight" => (KeySource::Arrows, Direction::Right),
            "KeyW" => (KeySource::Wasd, Direction::Up),
            "KeyS" => (KeySource::Wasd, Direction::Down),
            "KeyA" => (KeySource::Wasd, Direction::Left),
            "KeyD" => (KeySource::Wasd, Direction::Right),
            _ => return None,
        };
        Some(Self { source, direction })
    }
}

/// Held keys plus a latched pointer press
#[derive(Debug, Clone, Default)]
pub struct InputState {
    arrows: Directions,
    wasd: Directions,
    pointer_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is one we handle
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    pub fn pointer_down(&mut self) {
        self.pointer_pending = true;
    }

    /// Release everything (e.g. on window blur)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Input for the next frame; clears the pointer latch
    pub fn frame_input(&mut self) -> FrameInput {
        let input = FrameInput {
            arrows: self.arrows,
            wasd: self.wasd,
            pointer_down: self.pointer_pending,
        };
        self.pointer_pending = false;
        input
    }

    fn set_key(&mut self, code: &str, held: bool) -> bool {
        let Some(binding) = KeyBinding::from_code(code) else {
            return false;
        };
        let dirs = match binding.source {
            KeySource::Arrows => &mut self.arrows,
            KeySource::Wasd => &mut self.wasd,
        };
        match binding.direction {
            Direction::Up => dirs.up = held,
            Direction::Down => dirs.down = held,
            Direction::Left => dirs.left = held,
            Direction::Right => dirs.right = held,
        }
        true
    }
}
