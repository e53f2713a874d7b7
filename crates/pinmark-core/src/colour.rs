// colour.rs
// License: MIT
//
// ARGB colour value shared by overlays, tools and preferences.
// Format: 0xAARRGGBB

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour(pub u32);

impl Colour {
    pub const BLACK: Colour = Colour(0xFF00_0000);
    pub const WHITE: Colour = Colour(0xFFFF_FFFF);
    pub const RED: Colour = Colour(0xFFFF_0000);
    pub const TRANSPARENT: Colour = Colour(0x0000_0000);

    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Colour(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    #[inline]
    pub fn a(self) -> u8 { ((self.0 >> 24) & 0xFF) as u8 }
    #[inline]
    pub fn r(self) -> u8 { ((self.0 >> 16) & 0xFF) as u8 }
    #[inline]
    pub fn g(self) -> u8 { ((self.0 >> 8) & 0xFF) as u8 }
    #[inline]
    pub fn b(self) -> u8 { (self.0 & 0xFF) as u8 }

    /// Keeps RGB, swaps alpha.
    #[inline]
    pub fn with_alpha(self, alpha: u8) -> Self {
        Colour((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r(), self.g(), self.b(), self.a())
    }

    /// `#RRGGBB` for opaque colours, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.a() == 0xFF {
            format!("#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            format!("#{:08X}", self.0)
        }
    }

    /// `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn parse_hex(s: &str) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidColour { input: s.to_string(), reason };
        let s = s.trim();

        let hex = s.strip_prefix('#').ok_or_else(|| invalid("colour must start with #"))?;

        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid("invalid hex colour"))?;

        match hex.len() {
            6 => Ok(Colour(0xFF00_0000 | value)),
            8 => Ok(Colour(value)),
            _ => Err(invalid("colour must be 6 or 8 hex digits (RRGGBB or AARRGGBB)")),
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::RED
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
