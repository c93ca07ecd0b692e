//! Lightness and saturation shifts of a single color.
//!
//! A shift converts to HSL, adds a delta to one component, clamps that
//! component to `[0, 1]` and converts back. Hue is never touched, so a
//! gray pushed toward saturation picks up hue 0 (red).
//!
//! ```text
//! rgb --rgb_to_hsl--> (h, s, l) --+delta, clamp--> (h, s', l') --hsl_to_rgb--> rgb'
//! ```
//!
//! UI sliders report values in their own units; [`Adjustment::from_slider`]
//! divides by [`SLIDER_SCALE`] to get the delta.

use crate::hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};
use pixkit_core::Rgb;
use std::fmt;

/// Slider units per unit of HSL delta.
pub const SLIDER_SCALE: f64 = 400.0;

/// The HSL component an [`Adjustment`] shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslChannel {
    /// Shift `l`
    Lightness,
    /// Shift `s`
    Saturation,
}

impl fmt::Display for HslChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lightness => f.write_str("lightness"),
            Self::Saturation => f.write_str("saturation"),
        }
    }
}

/// A shift of one HSL component by `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Component to shift
    pub channel: HslChannel,
    /// Amount added to the component, in HSL units
    pub delta: f64,
}

impl Adjustment {
    /// Creates an adjustment. A non-finite delta becomes 0.
    pub fn new(channel: HslChannel, delta: f64) -> Self {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        Self { channel, delta }
    }

    /// Lightness shift.
    pub fn lightness(delta: f64) -> Self {
        Self::new(HslChannel::Lightness, delta)
    }

    /// Saturation shift.
    pub fn saturation(delta: f64) -> Self {
        Self::new(HslChannel::Saturation, delta)
    }

    /// Creates an adjustment from a slider value (`delta = value / 400`).
    ///
    /// ```
    /// use pixkit_color::{Adjustment, HslChannel};
    ///
    /// let adj = Adjustment::from_slider(HslChannel::Lightness, 100.0);
    /// assert_eq!(adj.delta, 0.25);
    /// ```
    pub fn from_slider(channel: HslChannel, value: f64) -> Self {
        Self::new(channel, value / SLIDER_SCALE)
    }

    /// Returns `true` if applying this adjustment cannot change anything.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.delta == 0.0
    }
}

impl Hsl {
    /// Returns a copy with `channel` shifted by `delta` and clamped to `[0, 1]`.
    pub fn shifted(self, channel: HslChannel, delta: f64) -> Self {
        match channel {
            HslChannel::Lightness => Hsl::new(self.h, self.s, (self.l + delta).clamp(0.0, 1.0)),
            HslChannel::Saturation => Hsl::new(self.h, (self.s + delta).clamp(0.0, 1.0), self.l),
        }
    }
}

/// Applies `adjustment` to one color.
///
/// ```
/// use pixkit_color::{shift_rgb, Adjustment};
/// use pixkit_core::Rgb;
///
/// assert_eq!(shift_rgb(Rgb::new(10, 200, 30), Adjustment::lightness(1.0)), Rgb::WHITE);
/// assert_eq!(shift_rgb(Rgb::new(10, 200, 30), Adjustment::lightness(-1.0)), Rgb::BLACK);
/// ```
#[inline]
pub fn shift_rgb(rgb: Rgb, adjustment: Adjustment) -> Rgb {
    let hsl = rgb_to_hsl(rgb).shifted(adjustment.channel, adjustment.delta);
    hsl_to_rgb(hsl)
}
