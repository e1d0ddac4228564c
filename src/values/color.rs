//! RGBA color, channels in 0.0..=1.0.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| f64::from(v) / 255.0)
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b));
        if byte(self.a) == 255 {
            rgb
        } else {
            format!("{rgb}{:02x}", byte(self.a))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
