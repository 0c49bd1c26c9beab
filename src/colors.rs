//! Floating point RGB color and packed ARGB8888 helpers.
//!
//! Shading happens in `[0, 1]` floats; the color buffer stores packed
//! `0xAARRGGBB` values ready for upload to an SDL streaming texture.

use std::ops::{Add, AddAssign, Div, Mul};

pub const BACKGROUND: u32 = 0xFF646464;

/// Linear RGB color with `f32` channels, nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Divides every channel by the largest one when any channel exceeds 1.
    ///
    /// Keeps the hue of over-bright colors instead of clipping each channel.
    pub fn max_to_one(self) -> Self {
        let max = self.r.max(self.g).max(self.b);
        if max > 1.0 {
            self / max
        } else {
            self
        }
    }

    /// Quantizes to 8 bits per channel and packs as opaque ARGB8888.
    pub fn to_argb(self) -> u32 {
        pack_color(self.r, self.g, self.b, 1.0)
    }
}

impl Add for ColorRgb {
    type Output = ColorRgb;

    fn add(self, rhs: ColorRgb) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for ColorRgb {
    fn add_assign(&mut self, rhs: ColorRgb) {
        *self = *self + rhs;
    }
}

/// Component-wise modulation.
impl Mul for ColorRgb {
    type Output = ColorRgb;

    fn mul(self, rhs: ColorRgb) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for ColorRgb {
    type Output = ColorRgb;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Div<f32> for ColorRgb {
    type Output = ColorRgb;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

/// Packs `[0, 1]` channels into ARGB8888. Out-of-range channels are clamped.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpacks the RGB channels of an ARGB8888 value into `[0, 1]` floats.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    (channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn max_to_one_scales_by_largest_channel() {
        let c = ColorRgb::new(2.0, 1.0, 0.5).max_to_one();
        assert_relative_eq!(c.r, 1.0);
        assert_relative_eq!(c.g, 0.5);
        assert_relative_eq!(c.b, 0.25);
    }

    #[test]
    fn max_to_one_leaves_in_range_colors() {
        let c = ColorRgb::new(0.2, 0.4, 1.0);
        assert_eq!(c.max_to_one(), c);
    }

    #[test]
    fn pack_and_unpack() {
        assert_eq!(ColorRgb::WHITE.to_argb(), 0xFFFFFFFF);
        assert_eq!(ColorRgb::new(1.0, 0.0, 0.0).to_argb(), 0xFFFF0000);
        let (r, g, b) = unpack_color(0xFF00FF00);
        assert_eq!((r, g, b), (0.0, 1.0, 0.0));
    }
}
