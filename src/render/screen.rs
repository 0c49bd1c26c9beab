//! NDC to raster space mapping.
//!
//! Raster space has its origin at the top-left corner with y growing down,
//! so NDC `(-1, 1)` lands on `(0, 0)` and `(1, -1)` on `(width, height)`.

use crate::math::vec2::Vec2;
use crate::math::vec4::Vec4;

use super::vertex::VertexOut;

#[inline]
pub fn ndc_to_screen(ndc: Vec4, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        width as f32 * (ndc.x + 1.0) * 0.5,
        height as f32 * (1.0 - ndc.y) * 0.5,
    )
}

/// Maps every output vertex to raster coordinates. Depth and w stay in the
/// [`VertexOut`] buffer.
pub fn to_screen_space(vertices: &[VertexOut], width: u32, height: u32) -> Vec<Vec2> {
    vertices
        .iter()
        .map(|v| ndc_to_screen(v.position, width, height))
        .collect()
}
