use std::path::Path;

use log::debug;

use crate::colors::ColorRgb;
use crate::math::vec2::Vec2;
use crate::mesh::LoadError;

/// An owned, decoded 2D image used for texture mapping.
///
/// Pixels are stored row-major with a top-left origin. Each texture owns its
/// pixel buffer exclusively; the buffer is freed when the texture is dropped.
#[derive(Debug)]
pub struct Texture {
    data: Vec<ColorRgb>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Loads a texture from an image file (PNG, JPG, BMP, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        debug!("Loaded texture {} ({}x{})", path.display(), width, height);

        let data = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                ColorRgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps an existing pixel buffer. Returns `None` if the buffer does not
    /// match the dimensions or the texture would be empty.
    pub fn from_pixels(width: u32, height: u32, data: Vec<ColorRgb>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// A 1x1 texture of a single color.
    pub fn solid(color: ColorRgb) -> Self {
        Self {
            data: vec![color],
            width: 1,
            height: 1,
        }
    }

    /// A `size` x `size` checkerboard with `cells` squares per side.
    pub fn checker(size: u32, cells: u32, a: ColorRgb, b: ColorRgb) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (x / cell + y / cell) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Samples the texture at `uv` using nearest-neighbour filtering.
    ///
    /// `uv` is expected in `[0, 1]`; the rasterizer clamps or wraps before
    /// calling. Coordinates are still clamped to the last texel so `u = 1` or
    /// `v = 1` stays in bounds.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> ColorRgb {
        let x = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32) as u32).min(self.height - 1);
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        let data = vec![
            ColorRgb::gray(0.0),
            ColorRgb::gray(0.25),
            ColorRgb::gray(0.5),
            ColorRgb::gray(1.0),
        ];
        Texture::from_pixels(2, 2, data).unwrap()
    }

    #[test]
    fn sample_picks_nearest_texel() {
        let tex = gradient();
        assert_eq!(tex.sample(Vec2::new(0.1, 0.1)), ColorRgb::gray(0.0));
        assert_eq!(tex.sample(Vec2::new(0.9, 0.1)), ColorRgb::gray(0.25));
        assert_eq!(tex.sample(Vec2::new(0.1, 0.9)), ColorRgb::gray(0.5));
    }

    #[test]
    fn sample_edge_stays_in_bounds() {
        let tex = gradient();
        assert_eq!(tex.sample(Vec2::ONE), ColorRgb::gray(1.0));
        assert_eq!(tex.sample(Vec2::ZERO), ColorRgb::gray(0.0));
    }

    #[test]
    fn from_pixels_rejects_mismatched_buffer() {
        assert!(Texture::from_pixels(2, 2, vec![ColorRgb::BLACK; 3]).is_none());
        assert!(Texture::from_pixels(0, 0, Vec::new()).is_none());
    }

    #[test]
    fn checker_alternates_cells() {
        let tex = Texture::checker(4, 2, ColorRgb::WHITE, ColorRgb::BLACK);
        assert_eq!(tex.sample(Vec2::new(0.1, 0.1)), ColorRgb::WHITE);
        assert_eq!(tex.sample(Vec2::new(0.6, 0.1)), ColorRgb::BLACK);
        assert_eq!(tex.sample(Vec2::new(0.6, 0.6)), ColorRgb::WHITE);
    }
}
