//! Border color

use crate::{OverlayError, OverlayResult};
use std::str::FromStr;

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> OverlayResult<Self> {
        let invalid = || OverlayError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }

        let byte = |index: usize| {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).map_err(|_| invalid())
        };
        let alpha = if digits.len() == 8 { byte(3)? } else { 255 };

        Ok(Self::from_rgba8(byte(0)?, byte(1)?, byte(2)?, alpha))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl FromStr for Color {
    type Err = OverlayError;

    fn from_str(s: &str) -> OverlayResult<Self> {
        Self::from_hex(s)
    }
}
