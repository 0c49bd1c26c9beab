//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the perspective
//! parameters (FOV, aspect ratio, near/far planes). It caches the projection
//! matrix and only rebuilds it when the FOV or the aspect ratio changes.

use crate::math::mat4::Mat4;

/// Perspective projection parameters with a cached matrix.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
    matrix: Mat4,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
            matrix: Mat4::perspective_fov_lh(fov_y, aspect_ratio, z_near, z_far),
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on window resize).
    ///
    /// Returns true when the matrix had to be rebuilt.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> bool {
        if aspect_ratio == self.aspect_ratio {
            return false;
        }
        self.aspect_ratio = aspect_ratio;
        self.rebuild();
        true
    }

    /// Updates the vertical field of view (radians).
    ///
    /// Returns true when the matrix had to be rebuilt.
    pub fn set_fov_y(&mut self, fov_y: f32) -> bool {
        if fov_y == self.fov_y {
            return false;
        }
        self.fov_y = fov_y;
        self.rebuild();
        true
    }

    /// The left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    fn rebuild(&mut self) {
        self.matrix =
            Mat4::perspective_fov_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn matrix_rebuilds_only_on_change() {
        let mut proj = Projection::from_degrees(90.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.matrix().get(0, 0), 1.0, epsilon = 1e-6);

        assert!(!proj.set_aspect_ratio(1.0));
        assert!(proj.set_aspect_ratio(2.0));
        assert_relative_eq!(proj.matrix().get(0, 0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(proj.matrix().get(1, 1), 1.0, epsilon = 1e-6);

        assert!(proj.set_fov_y(FRAC_PI_4));
        assert!(proj.matrix().get(1, 1) > 1.0);
    }
}
