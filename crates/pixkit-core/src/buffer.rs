//! Raw RGBA pixel buffer.
//!
//! [`PixelBuffer`] is the one entity every engine consumes and produces:
//! the bytes a canvas hands out, `width * height * 4` of them, row-major,
//! top-to-bottom, `[R G B A R G B A ...]`.
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The buffer owns its bytes. Engines take `&mut PixelBuffer` and mutate in
//! place, or take one by value and hand it back, so ownership is always
//! clear when a buffer crosses to a worker thread.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Point, Rgba};
//!
//! let mut buf = PixelBuffer::new(4, 4);
//! buf.set_rgba(Point::new(1, 2), Rgba::new(10, 10, 10, 255)).unwrap();
//! assert_eq!(buf.rgba_at(Point::new(1, 2)), Some(Rgba::new(10, 10, 10, 255)));
//! assert_eq!(buf.rgba_at(Point::new(-1, 2)), None);
//! ```

use crate::{Error, Point, Result, Rgb, Rgba};
use std::fmt;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 buffer with the invariant `data.len() == width * height * 4`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a transparent black buffer.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`. Use
    /// [`from_raw`](Self::from_raw) for untrusted dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let len = byte_len(width, height).expect("pixel buffer size overflow");
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel.to_array());
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::SizeOverflow`] if the dimensions cannot be addressed
    /// - [`Error::InvalidDimensions`] if `data.len() != width * height * 4`
    ///
    /// ```rust
    /// use pixkit_core::PixelBuffer;
    ///
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height).ok_or(Error::SizeOverflow { width, height })?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes, mutable. The length cannot change through a slice, so
    /// the size invariant holds.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns `true` if `p` addresses a pixel. Negative coordinates never do.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Byte offset of the pixel at `p`, or `None` outside the buffer.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize * self.width as usize + p.x as usize) * CHANNELS)
        } else {
            None
        }
    }

    /// Pixel at `p`, or `None` outside the buffer.
    #[inline]
    pub fn rgba_at(&self, p: Point) -> Option<Rgba> {
        let i = self.index_of(p)?;
        Some(Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Color at `p` without alpha, or `None` outside the buffer.
    #[inline]
    pub fn rgb_at(&self, p: Point) -> Option<Rgb> {
        self.rgba_at(p).map(Rgba::rgb)
    }

    /// Writes the pixel at `p`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `p` is outside the buffer.
    pub fn set_rgba(&mut self, p: Point, px: Rgba) -> Result<()> {
        let i = self
            .index_of(p)
            .ok_or_else(|| Error::out_of_bounds(p.x, p.y, self.width, self.height))?;
        self.data[i..i + CHANNELS].copy_from_slice(&px.to_array());
        Ok(())
    }

    /// Iterates over rows of `stride()` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0, an empty-width buffer has no rows anyway
        self.data.chunks_exact(self.stride().max(1))
    }

    /// Iterates mutably over rows of `stride()` bytes.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let stride = self.stride().max(1);
        self.data.chunks_exact_mut(stride)
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.as_raw().len(), 24);
        assert!(buf.pixels().all(|p| p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_filled() {
        let px = Rgba::new(1, 2, 3, 4);
        let buf = PixelBuffer::filled(2, 2, px);
        assert_eq!(buf.pixels().count(), 4);
        assert!(buf.pixels().all(|p| p == px));
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 2, height: 2, .. }));
    }

    #[test]
    fn test_from_raw_zero_area() {
        let buf = PixelBuffer::from_raw(0, 5, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.rows().count(), 0);
    }

    #[test]
    fn test_contains_checks_both_bounds() {
        let buf = PixelBuffer::new(4, 4);
        assert!(buf.contains(Point::new(0, 0)));
        assert!(buf.contains(Point::new(3, 3)));
        assert!(!buf.contains(Point::new(4, 0)));
        assert!(!buf.contains(Point::new(0, 4)));
        assert!(!buf.contains(Point::new(-1, 0)));
        assert!(!buf.contains(Point::new(0, -1)));
    }

    #[test]
    fn test_index_is_row_major() {
        let buf = PixelBuffer::new(4, 4);
        assert_eq!(buf.index_of(Point::new(1, 2)), Some((2 * 4 + 1) * 4));
    }

    #[test]
    fn test_set_and_get() {
        let mut buf = PixelBuffer::new(2, 2);
        let p = Point::new(1, 1);
        buf.set_rgba(p, Rgba::new(9, 8, 7, 6)).unwrap();
        assert_eq!(buf.rgba_at(p), Some(Rgba::new(9, 8, 7, 6)));
        assert_eq!(buf.rgb_at(p), Some(Rgb::new(9, 8, 7)));
        assert_eq!(&buf.as_raw()[12..16], &[9, 8, 7, 6]);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut buf = PixelBuffer::new(2, 2);
        let err = buf.set_rgba(Point::new(-1, 0), Rgba::TRANSPARENT).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_rows_mut() {
        let mut buf = PixelBuffer::new(2, 3);
        for (y, row) in buf.rows_mut().enumerate() {
            row.fill(y as u8);
        }
        assert_eq!(buf.rgba_at(Point::new(1, 2)), Some(Rgba::new(2, 2, 2, 2)));
    }

    #[test]
    fn test_debug_is_compact() {
        let s = format!("{:?}", PixelBuffer::new(8, 8));
        assert!(s.contains("bytes: 256"));
    }
}
