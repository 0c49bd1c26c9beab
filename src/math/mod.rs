//! Linear algebra kernel: small vectors and a 4x4 matrix.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Remaps `value` from `[min, max]` to `[0, 1]`, clamped.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
