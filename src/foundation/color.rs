use crate::foundation::error::{LevelError, LevelResult};

/// An opaque 8-bit RGB color as written in level configurations (`#RRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `RRGGBB` with an optional leading `#`, case-insensitive.
    pub fn from_hex(s: &str) -> LevelResult<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LevelError::validation(format!(
                "background color \"{s}\" must be six hex digits (#RRGGBB)"
            )));
        }

        fn hex_byte(pair: &str) -> LevelResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| LevelError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    /// Engine color: every channel in `[0, 1]`, alpha fixed at 1.
    pub fn normalized(self) -> ColorF {
        ColorF {
            r: f64::from(self.r) / 255.0,
            g: f64::from(self.g) / 255.0,
            b: f64::from(self.b) / 255.0,
            a: 1.0,
        }
    }
}

/// Straight (non-premultiplied) floating point color in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorF {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
