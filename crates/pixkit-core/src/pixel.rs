//! 8-bit color values.
//!
//! # Types
//!
//! - [`Rgb`] - opaque color, the value a tool paints with
//! - [`Rgba`] - a pixel as stored in a [`PixelBuffer`](crate::PixelBuffer)
//!
//! Channels are always `u8`. Constructors taking wider integers clamp to
//! `[0, 255]` instead of failing, so a color picked from a slider or typed
//! by hand is always usable.
//!
//! # Hex strings
//!
//! ```
//! use pixkit_core::Rgb;
//!
//! let c: Rgb = "#0a0a0a".parse().unwrap();
//! assert_eq!(c, Rgb::new(10, 10, 10));
//! assert_eq!(Rgb::from_hex("#abc").unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
//! assert_eq!(c.to_hex(), "#0a0a0a");
//!
//! // Garbage falls back to black on the lossy path.
//! assert_eq!(Rgb::from_hex_lossy("#0a0a0Z"), Rgb::BLACK);
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from byte channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from arbitrary integers, clamping each to `[0, 255]`.
    ///
    /// ```
    /// use pixkit_core::Rgb;
    ///
    /// assert_eq!(Rgb::clamped(300, 10, 500), Rgb::new(255, 10, 255));
    /// assert_eq!(Rgb::clamped(-10, 10, -100), Rgb::new(0, 10, 0));
    /// ```
    #[inline]
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Returns channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Creates a color from `[r, g, b]`.
    #[inline]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Parses `#rrggbb` or the `#rgb` shorthand.
    ///
    /// The leading `#` is optional and hex digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHex`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidHex(hex.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidHex(hex.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| Error::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parses a hex color, returning black when the string is malformed.
    pub fn from_hex_lossy(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

/// 8-bit RGBA pixel.
///
/// Equality is exact on all four channels, which is what region growing
/// relies on: two pixels with the same RGB but different alpha belong to
/// different regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel from byte channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque pixel from a color.
    #[inline]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, 255)
    }

    /// Drops the alpha channel.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates a pixel from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_passthrough() {
        assert_eq!(Rgb::clamped(10, 10, 10), Rgb::new(10, 10, 10));
    }

    #[test]
    fn test_rgb_clamps_high_and_low() {
        assert_eq!(Rgb::clamped(300, 10, 500), Rgb::new(255, 10, 255));
        assert_eq!(Rgb::clamped(-10, 10, -100), Rgb::new(0, 10, 0));
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(Rgb::new(10, 10, 10).to_hex(), "#0a0a0a");
        assert_eq!(Rgb::new(255, 0, 171).to_string(), "#ff00ab");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(Rgb::from_hex("#0a0a0a").unwrap(), Rgb::new(10, 10, 10));
        assert_eq!(Rgb::from_hex("0A0A0A").unwrap(), Rgb::new(10, 10, 10));
        assert_eq!(Rgb::from_hex("#ac3").unwrap(), Rgb::new(0xaa, 0xcc, 0x33));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(Rgb::from_hex("#0a0a0Z"), Err(Error::InvalidHex(_))));
        assert!(Rgb::from_hex("#0a0a").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        assert_eq!(Rgb::from_hex_lossy("#0a0a0Z"), Rgb::BLACK);
    }

    #[test]
    fn test_from_str_trims() {
        let c: Rgb = "  #FFF ".parse().unwrap();
        assert_eq!(c, Rgb::WHITE);
    }

    #[test]
    fn test_rgba_helpers() {
        let px = Rgba::opaque(Rgb::new(1, 2, 3));
        assert_eq!(px, Rgba::new(1, 2, 3, 255));
        assert!(px.is_opaque());
        assert_eq!(px.rgb(), Rgb::new(1, 2, 3));
        assert_eq!(Rgba::from([1, 2, 3, 4]).to_array(), [1, 2, 3, 4]);
        assert!(!Rgba::TRANSPARENT.is_opaque());
    }
}
