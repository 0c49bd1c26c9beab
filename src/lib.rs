//! A CPU-based software triangle rasterizer.
//!
//! Meshes are transformed through a world-view-projection pipeline and drawn
//! with an edge-function rasterizer featuring depth buffering,
//! perspective-correct texturing and simple directional lighting. SDL2 is used
//! only for window management and display.
//!
//! # Quick Start
//!
//! ```ignore
//! use softraster::prelude::*;
//!
//! let mut window = Window::new("My App", 640, 480)?;
//! let mut engine = Engine::new(640, 480);
//! engine.load_demo_scene()?;
//! engine.render();
//! window.present(engine.frame_buffer())?;
//! ```

pub mod camera;
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use engine::Engine;
pub use mesh::{LoadError, Mesh};
pub use projection::Projection;
pub use render::{RasterSettings, ShadingMode};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController, CameraInput};

    // Engine
    pub use crate::engine::Engine;

    // Scene
    pub use crate::colors::ColorRgb;
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{LoadError, Mesh, PrimitiveTopology, Vertex};
    pub use crate::texture::Texture;

    // Projection
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{
        FrustumPolicy, Material, RasterSettings, ShadingMode, UvWrapMode,
    };

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::rasterize_with_shader;
    pub use crate::render::{
        to_screen_space, transform_vertices, FlatShader, FrameBuffer, Material, MaterialShader,
        RasterSettings, Renderer, ShadingMode, TriangleRasterizer, VertexOut,
    };
}
