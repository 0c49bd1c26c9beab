//! Vertex stage: model space to perspective-divided clip space.

use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;

/// A vertex after the vertex stage.
///
/// `position.xyz` is in normalized device coordinates while `position.w`
/// still holds the clip-space w, which the rasterizer needs for
/// perspective-correct interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexOut {
    pub position: Vec4,
    /// World-space unit normal.
    pub normal: Vec3,
    /// World-space unit tangent.
    pub tangent: Vec3,
    /// Clip-space xyz before the divide; used as the view vector when shading.
    pub view_direction: Vec3,
    pub uv: Vec2,
}

impl VertexOut {
    /// Interpolates every attribute. Used when clipping splits an edge.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
            tangent: self.tangent.lerp(other.tangent, t),
            view_direction: self.view_direction.lerp(other.view_direction, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// Runs one vertex through the world-view-projection transform.
#[inline]
pub fn transform_vertex(vertex: &Vertex, wvp: &Mat4, world: &Mat4) -> VertexOut {
    let clip = wvp.transform_point(vertex.position);
    VertexOut {
        position: clip.perspective_divide(),
        normal: world.transform_vector(vertex.normal).normalize(),
        tangent: world.transform_vector(vertex.tangent).normalize(),
        view_direction: clip.to_vec3(),
        uv: vertex.uv,
    }
}

/// Transforms a mesh's vertices into a fresh output buffer.
///
/// `wvp` is `projection * view * world`; `world` alone is used for the
/// direction attributes so they stay in world space for lighting.
pub fn transform_vertices(vertices: &[Vertex], wvp: Mat4, world: Mat4) -> Vec<VertexOut> {
    vertices
        .iter()
        .map(|vertex| transform_vertex(vertex, &wvp, &world))
        .collect()
}
