//! Triangle rasterization.
//!
//! [`TriangleRasterizer`] walks a mesh's triangle indices and turns each
//! triangle into shaded pixels:
//!
//! 1. Skip degenerate index triples
//! 2. Apply the [`FrustumPolicy`] (reject, or clip and re-triangulate)
//! 3. Hand the screen-space triangle to the edge-function rasterizer in
//!    [`edgefunction`], which depth-tests, interpolates and shades

pub mod edgefunction;
pub mod shader;

pub use edgefunction::{edge_function, rasterize_with_shader, TriangleSetup};
pub use shader::{
    FlatShader, Material, MaterialShader, PixelAttributes, PixelShader, ShadingMode,
};

use super::clipper::ClipPolygon;
use super::framebuffer::FrameBuffer;
use super::screen::ndc_to_screen;
use super::vertex::VertexOut;
use crate::camera::Camera;
use crate::math::vec2::Vec2;
use crate::mesh::TriangleIndices;

/// How interpolated texture coordinates outside `[0, 1]` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvWrapMode {
    /// Clamp each component to `[0, 1]`.
    #[default]
    Clamp,
    /// Keep the fractional part so the texture tiles.
    Repeat,
}

impl UvWrapMode {
    #[inline]
    pub fn apply(self, uv: Vec2) -> Vec2 {
        match self {
            UvWrapMode::Clamp => Vec2::new(uv.x.clamp(0.0, 1.0), uv.y.clamp(0.0, 1.0)),
            UvWrapMode::Repeat => Vec2::new(uv.x.rem_euclid(1.0), uv.y.rem_euclid(1.0)),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            UvWrapMode::Clamp => UvWrapMode::Repeat,
            UvWrapMode::Repeat => UvWrapMode::Clamp,
        }
    }
}

/// What to do with triangles that leave the view volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrustumPolicy {
    /// Drop the whole triangle if any vertex is outside the `[-1, 1]` cube.
    #[default]
    RejectTriangle,
    /// Clip against the six clip-space planes and rasterize the pieces.
    ClipAndRetriangulate,
}

impl FrustumPolicy {
    pub fn toggle(self) -> Self {
        match self {
            FrustumPolicy::RejectTriangle => FrustumPolicy::ClipAndRetriangulate,
            FrustumPolicy::ClipAndRetriangulate => FrustumPolicy::RejectTriangle,
        }
    }
}

impl std::fmt::Display for FrustumPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrustumPolicy::RejectTriangle => write!(f, "RejectTriangle"),
            FrustumPolicy::ClipAndRetriangulate => write!(f, "ClipAndRetriangulate"),
        }
    }
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterSettings {
    pub uv_wrap: UvWrapMode,
    pub frustum: FrustumPolicy,
    /// Write the depth buffer as grayscale instead of shading.
    pub display_depth: bool,
}

/// Per-mesh triangle rasterizer.
#[derive(Debug, Clone, Default)]
pub struct TriangleRasterizer {
    settings: RasterSettings,
}

impl TriangleRasterizer {
    pub fn new(settings: RasterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RasterSettings {
        &mut self.settings
    }

    /// Rasterizes every triangle the iterator yields.
    ///
    /// The iterator is reset first, so the same mesh can be drawn every frame.
    /// `vertices` and `screen` are the outputs of the vertex stage and the
    /// screen mapper for the same mesh. Returns the number of pixels written.
    pub fn render_mesh<S: PixelShader>(
        &self,
        triangles: &mut TriangleIndices,
        vertices: &[VertexOut],
        screen: &[Vec2],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        triangles.reset();
        let mut written = 0;
        while let Some(indices) = triangles.next_triangle() {
            written += self.render_triangle(indices, vertices, screen, buffer, shader);
        }
        written
    }

    /// Rasterizes a single indexed triangle. Returns the number of pixels written.
    pub fn render_triangle<S: PixelShader>(
        &self,
        indices: [u32; 3],
        vertices: &[VertexOut],
        screen: &[Vec2],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let [i0, i1, i2] = indices;
        if i0 == i1 || i1 == i2 || i0 == i2 {
            return 0;
        }

        let fetch = |i: u32| Some((vertices.get(i as usize)?, *screen.get(i as usize)?));
        let (Some((v0, s0)), Some((v1, s1)), Some((v2, s2))) = (fetch(i0), fetch(i1), fetch(i2))
        else {
            return 0;
        };

        let outside = [v0, v1, v2]
            .iter()
            .any(|v| Camera::is_outside_frustum(v.position));
        if !outside {
            let points = [s0, s1, s2];
            return rasterize_with_shader([v0, v1, v2], points, buffer, shader, &self.settings);
        }

        match self.settings.frustum {
            FrustumPolicy::RejectTriangle => 0,
            FrustumPolicy::ClipAndRetriangulate => {
                let (width, height) = (buffer.width(), buffer.height());
                let polygon = ClipPolygon::from_divided(v0, v1, v2).clip();
                polygon
                    .triangulate()
                    .map(|[a, b, c]| {
                        let points = [
                            ndc_to_screen(a.position, width, height),
                            ndc_to_screen(b.position, width, height),
                            ndc_to_screen(c.position, width, height),
                        ];
                        rasterize_with_shader([&a, &b, &c], points, buffer, shader, &self.settings)
                    })
                    .sum()
            }
        }
    }
}
