//! Pixel shaders for triangle rasterization.
//!
//! This module provides a trait-based abstraction for per-pixel shading computations,
//! similar to how GPUs separate the fixed-function rasterizer from programmable
//! fragment/pixel shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Bounding box computation and edge function evaluation
//! - Depth testing
//! - Perspective-correct attribute interpolation
//!
//! The shader handles:
//! - Texture sampling
//! - Lighting
//! - Final color computation (unclamped; the rasterizer clamps)

use std::f32::consts::PI;

use crate::colors::ColorRgb;
use crate::light::DirectionalLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Interpolated attributes for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelAttributes {
    /// Texture coordinates after wrapping, in `[0, 1]`.
    pub uv: Vec2,
    /// World-space unit normal.
    pub normal: Vec3,
    /// World-space unit tangent.
    pub tangent: Vec3,
    /// Unnormalized view vector.
    pub view_direction: Vec3,
}

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each visible pixel with its
/// perspective-correct attributes.
pub trait PixelShader {
    fn shade(&self, attributes: &PixelAttributes) -> ColorRgb;
}

/// Flat shader - returns a constant color for all pixels.
pub struct FlatShader {
    color: ColorRgb,
}

impl FlatShader {
    pub fn new(color: ColorRgb) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _attributes: &PixelAttributes) -> ColorRgb {
        self.color
    }
}

/// Lighting term shown by [`MaterialShader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Lambert cosine only, as grayscale.
    ObservedArea,
    /// Lambert diffuse with the diffuse map as albedo.
    Diffuse,
    /// Phong specular lobe only.
    Specular,
    /// Diffuse + specular + ambient.
    #[default]
    Combined,
}

impl ShadingMode {
    /// Cycles ObservedArea → Diffuse → Specular → Combined → ObservedArea.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::ObservedArea => write!(f, "ObservedArea"),
            ShadingMode::Diffuse => write!(f, "Diffuse"),
            ShadingMode::Specular => write!(f, "Specular"),
            ShadingMode::Combined => write!(f, "Combined"),
        }
    }
}

/// Surface textures sampled by [`MaterialShader`].
#[derive(Debug)]
pub struct Material {
    pub diffuse: Texture,
    /// Tangent-space normals encoded in `[0, 1]`.
    pub normal: Texture,
    pub specular: Texture,
    /// Red channel scales [`Material::glossiness`].
    pub gloss: Texture,
    /// Phong exponent multiplier.
    pub glossiness: f32,
}

impl Material {
    pub const DEFAULT_GLOSSINESS: f32 = 25.0;

    pub fn new(diffuse: Texture, normal: Texture, specular: Texture, gloss: Texture) -> Self {
        Self {
            diffuse,
            normal,
            specular,
            gloss,
            glossiness: Self::DEFAULT_GLOSSINESS,
        }
    }
}

impl Default for Material {
    /// White albedo, flat normal map, no specular.
    fn default() -> Self {
        Self::new(
            Texture::solid(ColorRgb::WHITE),
            Texture::solid(ColorRgb::new(0.5, 0.5, 1.0)),
            Texture::solid(ColorRgb::BLACK),
            Texture::solid(ColorRgb::WHITE),
        )
    }
}

/// Lambert + Phong shader driven by a directional light and a [`Material`].
pub struct MaterialShader<'a> {
    light: &'a DirectionalLight,
    material: &'a Material,
    mode: ShadingMode,
    normal_mapping: bool,
}

impl<'a> MaterialShader<'a> {
    pub fn new(
        light: &'a DirectionalLight,
        material: &'a Material,
        mode: ShadingMode,
        normal_mapping: bool,
    ) -> Self {
        Self {
            light,
            material,
            mode,
            normal_mapping,
        }
    }

    /// Perturbs the interpolated normal with the normal map through the TBN basis.
    #[inline]
    fn surface_normal(&self, attributes: &PixelAttributes) -> Vec3 {
        if !self.normal_mapping {
            return attributes.normal;
        }
        let sample = self.material.normal.sample(attributes.uv);
        let local = Vec3::new(
            2.0 * sample.r - 1.0,
            2.0 * sample.g - 1.0,
            2.0 * sample.b - 1.0,
        );

        let tangent = attributes.tangent;
        let normal = attributes.normal;
        let binormal = normal.cross(tangent);
        (tangent * local.x + binormal * local.y + normal * local.z).normalize()
    }

    #[inline]
    fn specular(&self, attributes: &PixelAttributes, normal: Vec3) -> ColorRgb {
        let reflected = (-self.light.direction).reflect(normal);
        let cos_alpha = reflected
            .dot(attributes.view_direction.normalize())
            .max(0.0);
        let exponent = self.material.glossiness * self.material.gloss.sample(attributes.uv).r;
        self.material.specular.sample(attributes.uv) * cos_alpha.powf(exponent)
    }

    #[inline]
    fn diffuse(&self, attributes: &PixelAttributes) -> ColorRgb {
        self.material.diffuse.sample(attributes.uv) * (self.light.intensity / PI)
    }
}

impl PixelShader for MaterialShader<'_> {
    #[inline]
    fn shade(&self, attributes: &PixelAttributes) -> ColorRgb {
        let normal = self.surface_normal(attributes);
        let observed_area = self.light.observed_area(normal);

        match self.mode {
            ShadingMode::ObservedArea => ColorRgb::gray(observed_area),
            ShadingMode::Diffuse => self.diffuse(attributes) * observed_area,
            ShadingMode::Specular => self.specular(attributes, normal) * observed_area,
            ShadingMode::Combined => {
                (self.diffuse(attributes) + self.specular(attributes, normal) + self.light.ambient)
                    * observed_area
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facing_light() -> PixelAttributes {
        PixelAttributes {
            uv: Vec2::new(0.5, 0.5),
            normal: -Vec3::UNIT_Z,
            tangent: Vec3::UNIT_X,
            view_direction: Vec3::UNIT_Z,
        }
    }

    #[test]
    fn observed_area_is_white_when_facing_light() {
        let light = DirectionalLight::new(Vec3::UNIT_Z, 1.0);
        let material = Material::default();
        let shader = MaterialShader::new(&light, &material, ShadingMode::ObservedArea, false);

        let color = shader.shade(&facing_light());
        assert_relative_eq!(color.r, 1.0, epsilon = 1e-6);
        assert_relative_eq!(color.g, 1.0, epsilon = 1e-6);
        assert_relative_eq!(color.b, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn observed_area_is_black_when_perpendicular() {
        let light = DirectionalLight::new(Vec3::UNIT_X, 1.0);
        let material = Material::default();
        let shader = MaterialShader::new(&light, &material, ShadingMode::ObservedArea, false);

        assert_eq!(shader.shade(&facing_light()), ColorRgb::BLACK);
    }

    #[test]
    fn diffuse_scales_albedo_by_intensity_over_pi() {
        let light = DirectionalLight::new(Vec3::UNIT_Z, PI);
        let mut material = Material::default();
        material.diffuse = Texture::solid(ColorRgb::new(0.5, 0.25, 1.0));
        let shader = MaterialShader::new(&light, &material, ShadingMode::Diffuse, false);

        let color = shader.shade(&facing_light());
        assert_relative_eq!(color.r, 0.5, epsilon = 1e-5);
        assert_relative_eq!(color.g, 0.25, epsilon = 1e-5);
        assert_relative_eq!(color.b, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn specular_peaks_along_reflection() {
        // Light shines along +Z onto a -Z facing surface; the reflection of -L
        // about the normal is +Z, which matches the view direction.
        let light = DirectionalLight::new(Vec3::UNIT_Z, 1.0);
        let mut material = Material::default();
        material.specular = Texture::solid(ColorRgb::WHITE);
        let shader = MaterialShader::new(&light, &material, ShadingMode::Specular, false);

        let mut attributes = facing_light();
        attributes.view_direction = Vec3::UNIT_Z * 3.0;
        let color = shader.shade(&attributes);
        assert_relative_eq!(color.r, 1.0, epsilon = 1e-5);

        attributes.view_direction = Vec3::UNIT_X;
        assert_relative_eq!(shader.shade(&attributes).r, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn flat_normal_map_keeps_geometric_normal() {
        let light = DirectionalLight::new(Vec3::UNIT_Z, 1.0);
        let material = Material::new(
            Texture::solid(ColorRgb::WHITE),
            Texture::solid(ColorRgb::new(0.5, 0.5, 1.0)),
            Texture::solid(ColorRgb::BLACK),
            Texture::solid(ColorRgb::WHITE),
        );
        let shader = MaterialShader::new(&light, &material, ShadingMode::ObservedArea, true);
        assert_relative_eq!(shader.shade(&facing_light()).r, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn shading_mode_cycles() {
        let mut mode = ShadingMode::ObservedArea;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, ShadingMode::ObservedArea);
        assert_eq!(ShadingMode::Specular.next(), ShadingMode::Combined);
    }
}
