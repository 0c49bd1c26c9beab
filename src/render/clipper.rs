//! Clip-space clipping against the homogeneous clip cube.
//!
//! Clipping works on homogeneous clip coordinates (before the perspective
//! divide). The clip volume is defined by:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! which is the same `[-1, 1]` cube the reject test checks after the divide.
//! The planes are fixed, so the clipper never needs rebuilding when the
//! projection changes.

use super::vertex::VertexOut;

/// The 6 planes of the canonical clip-space cube.
///
/// The signed distance is positive when inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= -w
    Near,
    /// z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Returns the signed distance from a homogeneous vertex to this plane.
    pub fn signed_distance(&self, v: &VertexOut) -> f32 {
        let p = v.position;
        match self {
            Self::Left => p.w + p.x,
            Self::Right => p.w - p.x,
            Self::Bottom => p.w + p.y,
            Self::Top => p.w - p.y,
            Self::Near => p.w + p.z,
            Self::Far => p.w - p.z,
        }
    }
}

/// A convex polygon in homogeneous clip space.
///
/// Used as an intermediate representation during clipping. After clipping
/// against all planes it is fanned back into triangles for rasterization.
#[derive(Debug, Clone, Default)]
pub struct ClipPolygon {
    pub vertices: Vec<VertexOut>,
}

impl ClipPolygon {
    /// Builds a polygon from three pipeline outputs, undoing the perspective
    /// divide so positions are homogeneous again.
    pub fn from_divided(v0: &VertexOut, v1: &VertexOut, v2: &VertexOut) -> Self {
        let homogeneous = |v: &VertexOut| VertexOut {
            position: v.position.undo_perspective_divide(),
            ..*v
        };
        Self {
            vertices: vec![homogeneous(v0), homogeneous(v1), homogeneous(v2)],
        }
    }

    /// Returns true if the polygon has been completely clipped away.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Clip this polygon against a single plane using the Sutherland-Hodgman algorithm.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        if self.is_empty() {
            return Self::default();
        }

        let mut output = Vec::with_capacity(self.vertices.len() + 1);

        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];

            let d1 = plane.signed_distance(current);
            let d2 = plane.signed_distance(next);
            let current_inside = d1 >= 0.0;
            let next_inside = d2 >= 0.0;

            if current_inside {
                output.push(*current);
            }
            if current_inside != next_inside {
                let t = d1 / (d1 - d2);
                output.push(current.lerp(next, t));
            }
        }

        Self { vertices: output }
    }

    /// Clips against all six planes of the clip cube.
    pub fn clip(self) -> Self {
        let mut result = self;
        for plane in ClipPlane::ALL {
            if result.is_empty() {
                break;
            }
            result = result.clip_against_plane(plane);
        }
        result
    }

    /// Fan-triangulates the (convex) polygon and re-applies the perspective divide.
    pub fn triangulate(&self) -> impl Iterator<Item = [VertexOut; 3]> + '_ {
        let divided = |v: &VertexOut| VertexOut {
            position: v.position.perspective_divide(),
            ..*v
        };
        (1..self.vertices.len().saturating_sub(1)).map(move |i| {
            [
                divided(&self.vertices[0]),
                divided(&self.vertices[i]),
                divided(&self.vertices[i + 1]),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    fn clip_vertex(x: f32, y: f32, z: f32, w: f32) -> VertexOut {
        VertexOut {
            position: Vec4::new(x, y, z, w),
            uv: Vec2::new(x, y),
            ..Default::default()
        }
    }

    #[test]
    fn inside_triangle_is_untouched() {
        let polygon = ClipPolygon {
            vertices: vec![
                clip_vertex(-0.5, -0.5, 0.5, 1.0),
                clip_vertex(0.5, -0.5, 0.5, 1.0),
                clip_vertex(0.0, 0.5, 0.5, 1.0),
            ],
        }
        .clip();
        assert_eq!(polygon.vertices.len(), 3);
        assert_eq!(polygon.triangulate().count(), 1);
    }

    #[test]
    fn one_vertex_outside_becomes_quad() {
        let polygon = ClipPolygon {
            vertices: vec![
                clip_vertex(-0.5, 0.0, 0.5, 1.0),
                clip_vertex(2.0, 0.0, 0.5, 1.0),
                clip_vertex(-0.5, 0.5, 0.5, 1.0),
            ],
        }
        .clip_against_plane(ClipPlane::Right);

        assert_eq!(polygon.vertices.len(), 4);
        for v in &polygon.vertices {
            assert!(v.position.x <= v.position.w + 1e-6);
        }
        // Intersection on the first edge lies at x = 1 with interpolated uv.
        assert_relative_eq!(polygon.vertices[1].position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(polygon.vertices[1].uv.x, 1.0, epsilon = 1e-6);
        assert_eq!(polygon.triangulate().count(), 2);
    }

    #[test]
    fn fully_outside_is_empty() {
        let polygon = ClipPolygon {
            vertices: vec![
                clip_vertex(2.0, 0.0, 0.5, 1.0),
                clip_vertex(3.0, 0.0, 0.5, 1.0),
                clip_vertex(2.5, 1.0, 0.5, 1.0),
            ],
        }
        .clip();
        assert!(polygon.is_empty());
        assert_eq!(polygon.triangulate().count(), 0);
    }

    #[test]
    fn divided_round_trip() {
        let v = clip_vertex(0.25, 0.5, 0.75, 4.0);
        let polygon = ClipPolygon::from_divided(&v, &v, &v);
        assert_eq!(polygon.vertices[0].position, Vec4::new(1.0, 2.0, 3.0, 4.0));
        let triangle = polygon.triangulate().next().unwrap();
        assert_eq!(triangle[0].position, v.position);
    }
}
