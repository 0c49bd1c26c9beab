//! Lighting types for the renderer.

use crate::colors::ColorRgb;
use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    /// Radiance multiplier applied to the diffuse term.
    pub intensity: f32,
    /// Flat ambient term added in combined shading.
    pub ambient: ColorRgb,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.577, -0.577, 0.577), 7.0)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            intensity,
            ambient: ColorRgb::gray(0.025),
        }
    }

    /// Lambert cosine: how much of the surface faces the light, in `[0, 1]`.
    pub fn observed_area(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        normal.dot(-self.direction).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_illumination() {
        // Light pointing toward -Z, normal facing +Z (toward the light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 1.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert!((light.observed_area(normal) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_illumination() {
        // Light pointing toward -Z, normal facing -Z (away from light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 1.0);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!(light.observed_area(normal) == 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        // Light pointing straight down (-Y), normal at 45 degrees
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), 1.0);
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        // cos(45) ≈ 0.707
        let area = light.observed_area(normal);
        assert!((area - 0.707).abs() < 0.01);
    }
}
