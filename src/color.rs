//! Paddle fill colors

use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Orange, the paddle color when health does not drive it
    pub const ORANGE: Rgb = Rgb::from_hex(0xffa500);
    /// Paddle color while the ball overlaps it
    pub const BLUE: Rgb = Rgb::from_hex(0x0000ff);
    pub const GREEN: Rgb = Rgb::from_hex(0x00ff00);
    pub const RED: Rgb = Rgb::from_hex(0xff0000);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// CSS form, e.g. `#ffa500`
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1), t clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}
