//! Edge function-based triangle rasterization.
//!
//! This module implements triangle rasterization using the edge function algorithm,
//! which is the foundation of modern GPU rasterization. The algorithm tests each
//! pixel against three edge equations to determine triangle coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute a bounding box around the triangle, padded by one pixel
//! 2. For each pixel center in the box, evaluate three edge functions
//! 3. A pixel is inside the triangle if all three are strictly positive
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is the
//! 2D cross product:
//!
//! ```text
//! E(P) = (B - A) x (P - A) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
//! ```
//!
//! # Winding Order
//!
//! Only triangles with a positive signed area `(v1 - v0) x (v2 - v0)` are
//! drawn. In raster space (y down) that is clockwise on screen. Triangles with
//! zero or negative area are culled.
//!
//! Pixels exactly on an edge are not covered, so two triangles sharing an edge
//! never both write a pixel whose center lies on that edge.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::{PixelAttributes, PixelShader};
use super::RasterSettings;
use crate::colors::ColorRgb;
use crate::math::remap;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::render::vertex::VertexOut;

/// Depth values below this are drawn black when visualizing the depth buffer.
pub const DEPTH_DISPLAY_MIN: f32 = 0.985;
pub const DEPTH_DISPLAY_MAX: f32 = 1.0;

/// Computes the edge function value for point P relative to edge (A -> B).
///
/// # Returns
///
/// - Positive: P lies on the inner side of a positive-area triangle's edge
/// - Negative: P lies on the outer side
/// - Zero: P lies exactly on the edge AB
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).cross(p - a)
}

/// Screen-space setup for one triangle: positions, area and pixel bounds.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSetup {
    points: [Vec2; 3],
    inv_area: f32,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl TriangleSetup {
    /// Builds the setup, or returns `None` if the triangle has zero or negative
    /// area, non-finite coordinates, or a bounding box outside the target.
    pub fn new(points: [Vec2; 3], width: u32, height: u32) -> Option<Self> {
        let [v0, v1, v2] = points;
        let area = edge_function(v0, v1, v2);
        if !area.is_finite() || area <= 0.0 {
            return None;
        }

        // Clamp in float space so far-off coordinates never overflow the cast.
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() - 1.0).max(0.0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() + 1.0).min(width as f32 - 1.0);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() - 1.0).max(0.0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() + 1.0).min(height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        let (min_x, max_x) = (min_x as i32, max_x as i32);
        let (min_y, max_y) = (min_y as i32, max_y as i32);

        Some(Self {
            points,
            inv_area: 1.0 / area,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Barycentric weights of `p`, or `None` when `p` is not strictly inside.
    ///
    /// Weight `i` belongs to vertex `i` and comes from the edge opposite it.
    #[inline]
    pub fn barycentric(&self, p: Vec2) -> Option<[f32; 3]> {
        let [v0, v1, v2] = self.points;
        let e0 = edge_function(v1, v2, p);
        let e1 = edge_function(v2, v0, p);
        let e2 = edge_function(v0, v1, p);

        if e0 > 0.0 && e1 > 0.0 && e2 > 0.0 {
            Some([e0 * self.inv_area, e1 * self.inv_area, e2 * self.inv_area])
        } else {
            None
        }
    }

    /// Inclusive pixel bounds `(min_x, max_x, min_y, max_y)`.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.max_x, self.min_y, self.max_y)
    }
}

/// Interpolates vertex attributes with perspective correction.
///
/// Screen-space weights are divided by each vertex's clip w and renormalized,
/// which is equivalent to `attr = (sum w_i * attr_i / w_clip_i) / (sum w_i / w_clip_i)`.
#[inline]
fn interpolate(
    vertices: [&VertexOut; 3],
    weights: [f32; 3],
    settings: &RasterSettings,
) -> Option<PixelAttributes> {
    let [a, b, c] = vertices;
    let p0 = weights[0] / a.position.w;
    let p1 = weights[1] / b.position.w;
    let p2 = weights[2] / c.position.w;
    let inv_sum = 1.0 / (p0 + p1 + p2);
    if !inv_sum.is_finite() {
        return None;
    }
    let (p0, p1, p2) = (p0 * inv_sum, p1 * inv_sum, p2 * inv_sum);

    let uv = a.uv * p0 + b.uv * p1 + c.uv * p2;
    Some(PixelAttributes {
        uv: settings.uv_wrap.apply(uv),
        normal: (a.normal * p0 + b.normal * p1 + c.normal * p2).normalize(),
        tangent: (a.tangent * p0 + b.tangent * p1 + c.tangent * p2).normalize(),
        view_direction: a.view_direction * p0 + b.view_direction * p1 + c.view_direction * p2,
    })
}

/// Rasterize one triangle using the provided pixel shader.
///
/// `vertices` carry NDC depth in `position.z` and clip w in `position.w`;
/// `points` are the matching raster-space positions. Returns the number of
/// pixels written.
pub fn rasterize_with_shader<S: PixelShader>(
    vertices: [&VertexOut; 3],
    points: [Vec2; 3],
    buffer: &mut FrameBuffer,
    shader: &S,
    settings: &RasterSettings,
) -> usize {
    let Some(setup) = TriangleSetup::new(points, buffer.width(), buffer.height()) else {
        return 0;
    };
    let [a, b, c] = vertices;
    let (min_x, max_x, min_y, max_y) = setup.bounds();
    let mut written = 0;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at pixel center
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(weights) = setup.barycentric(p) else {
                continue;
            };

            let depth = 1.0
                / (weights[0] / a.position.z
                    + weights[1] / b.position.z
                    + weights[2] / c.position.z);
            if !depth.is_finite() {
                continue;
            }

            // Attributes are resolved before the depth write so a pixel that
            // cannot be shaded leaves both buffers untouched.
            let attributes = if settings.display_depth {
                None
            } else {
                let Some(attributes) = interpolate(vertices, weights, settings) else {
                    continue;
                };
                Some(attributes)
            };
            if !buffer.depth_test_and_set(x, y, depth) {
                continue;
            }

            let color = match attributes {
                Some(attributes) => shader.shade(&attributes),
                None => ColorRgb::gray(remap(depth, DEPTH_DISPLAY_MIN, DEPTH_DISPLAY_MAX)),
            };
            buffer.set_pixel(x, y, color.max_to_one().to_argb());
            written += 1;
        }
    }

    written
}
