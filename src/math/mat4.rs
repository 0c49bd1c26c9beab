//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Left-handed world: +X right, +Y up, +Z forward
//!
//! # Example
//! ```ignore
//! let world_view_projection = projection * view * world;
//! let clip = world_view_projection * Vec4::point(position);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a matrix whose columns are the given basis axes and origin.
    ///
    /// This is the local-to-world matrix of an orthonormal frame.
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3, origin: Vec3) -> Self {
        Mat4::new([
            [x_axis.x, y_axis.x, z_axis.x, origin.x],
            [x_axis.y, y_axis.y, z_axis.y, origin.y],
            [x_axis.z, y_axis.z, z_axis.z, origin.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(v: Vec3) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, v.x],
            [0.0, 1.0, 0.0, v.y],
            [0.0, 0.0, 1.0, v.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(v: Vec3) -> Self {
        Mat4::new([
            [v.x, 0.0, 0.0, 0.0],
            [0.0, v.y, 0.0, 0.0],
            [0.0, 0.0, v.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the X axis. Positive angles turn +Z toward -Y.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Y axis. Positive angles turn +Z toward +X.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Left-handed perspective projection with a [0, 1] depth range.
    ///
    /// `fov` is the vertical field of view in radians. Clip w ends up holding
    /// the view-space z, so the perspective divide maps the near plane to
    /// z = 0 and the far plane to z = 1.
    pub fn perspective_fov_lh(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / (fov / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let range = far / (far - near);
        Mat4::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, range, -near * range],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Computes the inverse by Gauss-Jordan elimination with partial pivoting.
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let mut m = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            let pivot_row = (col..4)
                .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
                .unwrap_or(col);
            if m[pivot_row][col].abs() < f32::EPSILON {
                return None;
            }
            m.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let inv_pivot = 1.0 / m[col][col];
            for k in 0..4 {
                m[col][k] *= inv_pivot;
                inv[col][k] *= inv_pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// Transforms a point (w = 1) without perspective division.
    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        *self * Vec4::point(p)
    }

    /// Transforms a direction (w = 0): rotation and scale only, no translation.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-vector convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            let [x, y, z, w] = self.data[r];
            Vec4::new(x, y, z, w).dot(v)
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn inverse_undoes_transform() {
        let m = Mat4::translation(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::rotation_y(0.7)
            * Mat4::rotation_x(-0.3)
            * Mat4::scaling(Vec3::new(2.0, 1.0, 0.5));
        let inv = m.inverse().unwrap();
        assert_mat_eq(m * inv, Mat4::identity());
        assert_mat_eq(inv * m, Mat4::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat4::scaling(Vec3::new(1.0, 0.0, 1.0)).inverse().is_none());
    }

    #[test]
    fn rotation_y_turns_forward_to_right() {
        let v = Mat4::rotation_y(std::f32::consts::FRAC_PI_2).transform_vector(Vec3::UNIT_Z);
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_x_turns_forward_down() {
        let v = Mat4::rotation_x(std::f32::consts::FRAC_PI_2).transform_vector(Vec3::UNIT_Z);
        assert_relative_eq!(v.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn transform_vector_ignores_translation() {
        let m = Mat4::translation(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(m.transform_vector(Vec3::UNIT_X), Vec3::UNIT_X);
        assert_eq!(m.transform_point(Vec3::ZERO), Vec4::new(5.0, 5.0, 5.0, 1.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = Mat4::perspective_fov_lh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let near = (proj * Vec4::new(0.0, 0.0, 0.1, 1.0)).perspective_divide();
        let far = (proj * Vec4::new(0.0, 0.0, 100.0, 1.0)).perspective_divide();
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.w, 100.0);
    }
}
