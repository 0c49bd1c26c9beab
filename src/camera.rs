//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! The accumulated yaw and pitch angles are the only stored orientation.
//! Every update rebuilds `forward` from them, then derives `right` and `up`
//! from `forward` and world up (Gram-Schmidt), so the basis never drifts.
//!
//! - **Yaw**: rotation around world Y (positive = look right)
//! - **Pitch**: rotation around the camera's right axis (positive = look up)

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::projection::Projection;
use crate::window::InputState;

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

/// Per-frame camera motion, already scaled by frame time.
///
/// `move_delta` is expressed in the camera's local frame (x = right,
/// y = up, z = forward); `vertical_delta` moves along world Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    pub move_delta: Vec3,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub vertical_delta: f32,
}

impl CameraInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// First-person perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    total_yaw: f32,
    total_pitch: f32,
    pitch_limit: f32,

    projection: Projection,
    view_matrix: Mat4,
    inverse_view_matrix: Mat4,
}

impl Camera {
    /// Creates a camera at `origin` looking along +Z.
    pub fn new(origin: Vec3, fov_degrees: f32, aspect_ratio: f32) -> Self {
        Self::with_clip_planes(origin, fov_degrees, aspect_ratio, DEFAULT_NEAR, DEFAULT_FAR)
    }

    pub fn with_clip_planes(
        origin: Vec3,
        fov_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            origin,
            forward: Vec3::UNIT_Z,
            up: Vec3::UNIT_Y,
            right: Vec3::UNIT_X,
            total_yaw: 0.0,
            total_pitch: 0.0,
            pitch_limit: 89.0_f32.to_radians(),
            projection: Projection::from_degrees(fov_degrees, aspect_ratio, near, far),
            view_matrix: Mat4::identity(),
            inverse_view_matrix: Mat4::identity(),
        };
        camera.update_orientation();
        camera
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Applies one frame of movement and rotation, then rebuilds the view matrices.
    ///
    /// Translation uses the basis from before the rotation, so a frame's
    /// movement follows the direction the camera was facing when it started.
    pub fn apply(&mut self, input: &CameraInput) {
        self.origin += self.right * input.move_delta.x
            + self.up * input.move_delta.y
            + self.forward * input.move_delta.z
            + Vec3::UNIT_Y * input.vertical_delta;

        self.total_yaw = (self.total_yaw + input.yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.total_pitch =
            (self.total_pitch + input.pitch_delta).clamp(-self.pitch_limit, self.pitch_limit);

        self.update_orientation();
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.origin;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.total_yaw = direction.x.atan2(direction.z);
        }
        if direction.magnitude() > f32::EPSILON {
            self.total_pitch = direction
                .y
                .atan2(horizontal_len)
                .clamp(-self.pitch_limit, self.pitch_limit);
        }

        self.update_orientation();
    }

    /// Rebuilds the projection matrix only if the aspect ratio actually changed.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.projection.set_aspect_ratio(aspect_ratio);
    }

    fn update_orientation(&mut self) {
        let rotation = Mat4::rotation_y(self.total_yaw) * Mat4::rotation_x(-self.total_pitch);
        self.forward = rotation.transform_vector(Vec3::UNIT_Z).normalize();
        self.update_view_matrix();
    }

    /// Rebuilds the orthonormal basis from `forward` and inverts it into the view matrix.
    fn update_view_matrix(&mut self) {
        self.right = Vec3::UNIT_Y.cross(self.forward).normalize();
        self.up = self.forward.cross(self.right);

        self.inverse_view_matrix =
            Mat4::from_basis(self.right, self.up, self.forward, self.origin);
        // An orthonormal basis is never singular; fall back to the rigid inverse regardless.
        self.view_matrix = self
            .inverse_view_matrix
            .inverse()
            .unwrap_or_else(|| self.rigid_inverse());
    }

    fn rigid_inverse(&self) -> Mat4 {
        let (r, u, f, o) = (self.right, self.up, self.forward, self.origin);
        Mat4::new([
            [r.x, r.y, r.z, -r.dot(o)],
            [u.x, u.y, u.z, -u.dot(o)],
            [f.x, f.y, f.z, -f.dot(o)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if a perspective-divided position lies outside the
    /// canonical `[-1, 1]` cube on any axis. Non-finite positions count as outside.
    pub fn is_outside_frustum(position: Vec4) -> bool {
        let inside = |c: f32| (-1.0..=1.0).contains(&c);
        !(inside(position.x) && inside(position.y) && inside(position.z))
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Returns the yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.total_yaw
    }

    /// Returns the pitch angle in radians.
    pub fn pitch(&self) -> f32 {
        self.total_pitch
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// World-to-view matrix: the inverse of [`Camera::inverse_view_matrix`].
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Camera local-to-world matrix (the ONB with the origin as translation).
    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.inverse_view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view`, ready to be combined with a mesh world matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Maps polled keyboard and mouse state to a [`CameraInput`].
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Keyboard movement speed in units per second.
    pub move_speed: f32,
    /// Movement multiplier while the boost key is held.
    pub boost_factor: f32,
    /// Mouse-drag movement in units per pixel.
    pub drag_speed: f32,
    /// Mouse look sensitivity in radians per pixel.
    pub look_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            boost_factor: 4.0,
            drag_speed: 0.05,
            look_sensitivity: 0.002,
        }
    }
}

impl CameraController {
    /// Builds this frame's camera input.
    ///
    /// # Input Mapping
    /// - W/S: Move forward/backward
    /// - A/D: Strafe left/right
    /// - Space/Ctrl: Move up/down
    /// - Shift: Boost movement
    /// - Left drag: yaw and move forward/backward
    /// - Right drag: yaw and pitch
    /// - Both buttons drag: move up/down
    pub fn input(&self, input: &InputState, delta_time: f32) -> CameraInput {
        let boost = if input.boost { self.boost_factor } else { 1.0 };
        let step = self.move_speed * delta_time * boost;
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        let mut camera_input = CameraInput {
            move_delta: Vec3::new(
                axis(input.right, input.left) * step,
                0.0,
                axis(input.forward, input.back) * step,
            ),
            vertical_delta: axis(input.up, input.down) * step,
            ..CameraInput::default()
        };

        let (dx, dy) = (input.mouse_delta.0 as f32, input.mouse_delta.1 as f32);
        match (input.left_button, input.right_button) {
            (true, true) => camera_input.vertical_delta -= dy * self.drag_speed * boost,
            (true, false) => {
                camera_input.move_delta.z -= dy * self.drag_speed * boost;
                camera_input.yaw_delta += dx * self.look_sensitivity;
            }
            (false, true) => {
                camera_input.yaw_delta += dx * self.look_sensitivity;
                camera_input.pitch_delta -= dy * self.look_sensitivity;
            }
            (false, false) => {}
        }

        camera_input
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn camera_starts_looking_forward() {
        let camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        assert_vec_eq(camera.forward(), Vec3::UNIT_Z);
        assert_vec_eq(camera.right(), Vec3::UNIT_X);
        assert_vec_eq(camera.up(), Vec3::UNIT_Y);
    }

    #[test]
    fn view_matrix_inverts_basis() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0), 90.0, 1.0);
        let origin = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, 10.0, epsilon = 1e-5);

        let product = camera.view_matrix() * camera.inverse_view_matrix();
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(product.get(row, col), expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        camera.apply(&CameraInput {
            yaw_delta: FRAC_PI_2,
            ..Default::default()
        });
        assert_vec_eq(camera.forward(), Vec3::UNIT_X);
        assert_vec_eq(camera.right(), -Vec3::UNIT_Z);
    }

    #[test]
    fn positive_pitch_looks_up_and_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        camera.apply(&CameraInput {
            pitch_delta: 0.5,
            ..Default::default()
        });
        assert!(camera.forward().y > 0.0);

        camera.apply(&CameraInput {
            pitch_delta: std::f32::consts::PI,
            ..Default::default()
        });
        assert!(camera.pitch() < FRAC_PI_2);
        assert_relative_eq!(camera.pitch(), 89.0_f32.to_radians());
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        camera.apply(&CameraInput {
            yaw_delta: 0.8,
            pitch_delta: -0.6,
            ..Default::default()
        });
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());
        assert_relative_eq!(f.magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(r.magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(u.magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(f.dot(r), 0.0, epsilon = 1e-5);
        assert_relative_eq!(f.dot(u), 0.0, epsilon = 1e-5);
        assert_relative_eq!(r.dot(u), 0.0, epsilon = 1e-5);
        // right stays horizontal
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn move_delta_is_local() {
        let mut camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        camera.apply(&CameraInput {
            yaw_delta: FRAC_PI_2,
            ..Default::default()
        });
        camera.apply(&CameraInput {
            move_delta: Vec3::new(0.0, 0.0, 2.0),
            vertical_delta: 1.0,
            ..Default::default()
        });
        assert_vec_eq(camera.origin(), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn look_at_faces_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), 90.0, 1.0);
        camera.look_at(Vec3::new(5.0, 0.0, 0.0));
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert_vec_eq(camera.forward(), expected);
    }

    #[test]
    fn frustum_test_uses_unit_cube() {
        assert!(!Camera::is_outside_frustum(Vec4::new(0.0, 0.0, 0.5, 1.0)));
        assert!(!Camera::is_outside_frustum(Vec4::new(1.0, -1.0, 1.0, 1.0)));
        assert!(Camera::is_outside_frustum(Vec4::new(1.01, 0.0, 0.5, 1.0)));
        assert!(Camera::is_outside_frustum(Vec4::new(0.0, 0.0, -1.5, 1.0)));
        assert!(Camera::is_outside_frustum(Vec4::new(f32::NAN, 0.0, 0.5, 1.0)));
        assert!(Camera::is_outside_frustum(Vec4::new(f32::INFINITY, 0.0, 0.5, 1.0)));
    }

    #[test]
    fn controller_maps_keys_to_local_motion() {
        let controller = CameraController::default();
        let input = InputState {
            forward: true,
            left: true,
            boost: true,
            ..Default::default()
        };
        let camera_input = controller.input(&input, 0.5);
        assert_relative_eq!(camera_input.move_delta.z, 20.0);
        assert_relative_eq!(camera_input.move_delta.x, -20.0);
        assert!(CameraController::default()
            .input(&InputState::default(), 0.016)
            .is_idle());
    }

    #[test]
    fn controller_right_drag_rotates() {
        let controller = CameraController::default();
        let input = InputState {
            right_button: true,
            mouse_delta: (10, -5),
            ..Default::default()
        };
        let camera_input = controller.input(&input, 0.016);
        assert_relative_eq!(camera_input.yaw_delta, 0.02, epsilon = 1e-6);
        assert_relative_eq!(camera_input.pitch_delta, 0.01, epsilon = 1e-6);
        assert_eq!(camera_input.move_delta, Vec3::ZERO);
    }
}
