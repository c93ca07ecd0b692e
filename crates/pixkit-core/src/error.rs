//! Error types for pixkit-core.
//!
//! Covers the few ways a pixel buffer or a color value can be malformed:
//! a raw byte vector that does not match the declared dimensions, a
//! dimension product that overflows `usize`, a coordinate outside the
//! buffer, or a hex string that is not `#rgb` / `#rrggbb`.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{Error, Result};
//!
//! fn check(x: i32, y: i32, width: u32, height: u32) -> Result<()> {
//!     if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(-1, 0, 4, 4).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive macro for `Display` and `std::error::Error`
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - construction and pixel access
//! - [`crate::pixel::Rgb`] - hex parsing
//! - `pixkit-ops` - wraps this type in `OpsError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by core buffer and color types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raw data length does not match `width * height * 4`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// `width * height * 4` does not fit in `usize`.
    #[error("buffer size overflows for {width}x{height}")]
    SizeOverflow {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },

    /// A coordinate lies outside the buffer.
    ///
    /// Coordinates are signed because callers derive them from pointer
    /// positions, which can be negative.
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// String is not a `#rgb` or `#rrggbb` hex color.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(-3, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("-3"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(2, 2, "expected 16 bytes, got 15");
        assert!(err.to_string().contains("2x2"));
        assert!(err.to_string().contains("15"));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_invalid_hex_message() {
        let err = Error::InvalidHex("#0a0a0Z".into());
        assert!(err.to_string().contains("#0a0a0Z"));
    }
}
