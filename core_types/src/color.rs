//! RGB color type and hex parsing

use core::fmt;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const VIOLET: Rgb = Rgb::new(50, 0, 50);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const DARK_GREY: Rgb = Rgb::new(80, 80, 80);

    /// Creates a color from components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed 24-bit value (0xRRGGBB)
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Returns the packed 24-bit value (0xRRGGBB)
    pub const fn as_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parses a hex RGB string such as `"FF8800"` or `"0xFF8800"`.
    ///
    /// Invalid input parses to 0 (black). This mirrors the device's
    /// script-facing COLOR command contract.
    pub fn from_hex(text: &str) -> Self {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let value = u32::from_str_radix(digits, 16).unwrap_or(0);
        Self::from_u32(value & 0xFF_FF_FF)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
