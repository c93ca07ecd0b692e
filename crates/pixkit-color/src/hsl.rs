//! RGB <-> HSL conversion.
//!
//! HSL components are normalized to `[0, 1]`:
//!
//! - `h` - hue as a fraction of the color wheel (0 = red, 1/3 = green, 2/3 = blue)
//! - `s` - saturation
//! - `l` - lightness, `(max + min) / 2` of the normalized RGB channels
//!
//! Achromatic colors (`max == min`) have `h = s = 0`.
//!
//! # Example
//!
//! ```rust
//! use pixkit_color::{hsl_to_rgb, rgb_to_hsl};
//! use pixkit_core::Rgb;
//!
//! let red = rgb_to_hsl(Rgb::new(255, 0, 0));
//! assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));
//! assert_eq!(hsl_to_rgb(red), Rgb::new(255, 0, 0));
//! ```

use pixkit_core::Rgb;

/// A color in HSL space, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue, fraction of a full turn
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL value without normalizing.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Returns `true` for a gray (zero saturation).
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

/// Converts an 8-bit color to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0, s, l)
}

/// Converts HSL to normalized RGB in `[0, 1]` without quantizing.
pub fn hsl_to_rgb_unit(hsl: Hsl) -> [f64; 3] {
    let Hsl { h, s, l } = hsl;

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

/// Converts HSL to an 8-bit color.
///
/// Channels are scaled by 255, rounded half up and clamped to the byte range.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let [r, g, b] = hsl_to_rgb_unit(hsl);
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Piecewise hue ramp for one channel; `t` is the channel's hue offset.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[inline]
fn to_byte(v: f64) -> u8 {
    // NaN casts to 0
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries() {
        let g = rgb_to_hsl(Rgb::new(0, 255, 0));
        assert_abs_diff_eq!(g.h, 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.s, 1.0);
        assert_abs_diff_eq!(g.l, 0.5);

        let b = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert_abs_diff_eq!(b.h, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_magenta_wraps_hue() {
        // max is red and g < b, so the +6 branch applies
        let m = rgb_to_hsl(Rgb::new(255, 0, 128));
        assert!(m.h > 0.8 && m.h < 1.0, "hue {}", m.h);
    }

    #[test]
    fn test_gray_is_achromatic() {
        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert!(gray.is_achromatic());
        assert_eq!(gray.h, 0.0);
        assert_abs_diff_eq!(gray.l, 128.0 / 255.0);
        assert_eq!(hsl_to_rgb(gray), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_black_and_white() {
        assert_eq!(rgb_to_hsl(Rgb::BLACK), Hsl::new(0.0, 0.0, 0.0));
        assert_eq!(rgb_to_hsl(Rgb::WHITE), Hsl::new(0.0, 0.0, 1.0));
        assert_eq!(hsl_to_rgb(Hsl::new(0.3, 0.7, 1.0)), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(Hsl::new(0.3, 0.7, 0.0)), Rgb::BLACK);
    }

    #[test]
    fn test_saturation_branches() {
        // l <= 0.5 uses d / (max + min)
        let dark = rgb_to_hsl(Rgb::new(100, 50, 50));
        assert!(dark.l <= 0.5);
        assert_abs_diff_eq!(dark.s, (50.0 / 255.0) / (150.0 / 255.0), epsilon = 1e-12);

        // l > 0.5 uses d / (2 - max - min)
        let light = rgb_to_hsl(Rgb::new(250, 200, 200));
        assert!(light.l > 0.5);
        let (max, min) = (250.0 / 255.0, 200.0 / 255.0);
        assert_abs_diff_eq!(light.s, (max - min) / (2.0 - max - min), epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip_within_one() {
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(17) {
                    let c = Rgb::new(r as u8, g as u8, b as u8);
                    let back = hsl_to_rgb(rgb_to_hsl(c));
                    for (a, b) in c.to_array().iter().zip(back.to_array().iter()) {
                        assert!(
                            (*a as i32 - *b as i32).abs() <= 1,
                            "{:?} -> {:?}",
                            c,
                            back
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_hsl_is_clamped_to_bytes() {
        let rgb = hsl_to_rgb(Hsl::new(0.0, 0.0, 1.7));
        assert_eq!(rgb, Rgb::WHITE);
        let rgb = hsl_to_rgb(Hsl::new(0.0, 0.0, -0.2));
        assert_eq!(rgb, Rgb::BLACK);
    }
}
