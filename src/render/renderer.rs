//! Owned frame storage.
//!
//! Provides the [`Renderer`] struct which owns the color and depth buffers,
//! resets them between frames and exposes them to the rasterizer and the
//! window.

use std::path::Path;

use image::{ImageError, RgbImage};
use log::info;

use super::framebuffer::FrameBuffer;
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![f32::INFINITY; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Reset every depth to +inf (nothing drawn yet).
    #[inline]
    pub fn reset_depth(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes, in the `ARGB8888` layout SDL expects.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1; the length covers
        // exactly the bytes owned by `color_buffer`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// Writes the color buffer to a BMP file (alpha is dropped).
    pub fn save_bmp<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        let mut image = RgbImage::new(self.width, self.height);
        for (pixel, &color) in image.pixels_mut().zip(&self.color_buffer) {
            pixel.0 = [(color >> 16) as u8, (color >> 8) as u8, color as u8];
        }
        image.save_with_format(path, image::ImageFormat::Bmp)?;
        info!("Saved frame to {}", path.display());
        Ok(())
    }
}
