// Stroke colors: "#rgb" / "#rrggbb" strings from the color picker, combined
// with a separate opacity into one RGBA paint value.

use crate::error::ColorError;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Straight-alpha paint color; `a` in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[cfg(test)]
impl Rgba {
    pub(crate) const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// An opaque RGB color parsed from a hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Combine with an opacity in [0,1] (clamped) into a paint color.
    pub fn with_alpha(self, opacity: f32) -> Rgba {
        let a = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    /// `#abc` expands by digit duplication to `#aabbcc`. Strings of any other
    /// length paint black, like the color input's fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| err());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());

        match digits.len() {
            3 => Ok(Self::new(nibble(0)? * 0x11, nibble(1)? * 0x11, nibble(2)? * 0x11)),
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            _ => Ok(Self::new(0, 0, 0)),
        }
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
