//! Straight-alpha RGBA colors and CSS hex parsing.

use std::fmt;

use rand::Rng;

use crate::error::SceneError;

/// A color with unpremultiplied channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channel magnitudes, which may be fractional, and an alpha in `[0, 1]`.
    pub fn from_rgb8(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a)
    }

    /// Parse a CSS hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, SceneError> {
        let invalid = || SceneError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);

        let channels: Result<Vec<u8>, _> = match digits.len() {
            3 | 4 => (0..digits.len()).map(nibble).collect(),
            6 | 8 => (0..digits.len()).step_by(2).map(byte).collect(),
            _ => return Err(invalid()),
        };
        let channels = channels.map_err(|_| invalid())?;
        let alpha = channels.get(3).map_or(1.0, |&a| a as f32 / 255.0);

        Ok(Self::from_rgb8(
            channels[0] as f32,
            channels[1] as f32,
            channels[2] as f32,
            alpha,
        ))
    }

    /// A random translucent color: each channel magnitude uniform in `[0, 255)`,
    /// alpha uniform in `[0, 1)`.
    pub fn random_translucent<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_rgb8(
            rng.random::<f32>() * 255.0,
            rng.random::<f32>() * 255.0,
            rng.random::<f32>() * 255.0,
            rng.random::<f32>(),
        )
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({:.0}, {:.0}, {:.0}, {:.3})",
            self.r * 255.0,
            self.g * 255.0,
            self.b * 255.0,
            self.a
        )
    }
}
