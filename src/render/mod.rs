//! The rendering pipeline: vertex stage, screen mapping, clipping,
//! rasterization and the buffers it draws into.

pub mod clipper;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod screen;
pub mod vertex;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    FlatShader, FrustumPolicy, Material, MaterialShader, PixelAttributes, PixelShader,
    RasterSettings, ShadingMode, TriangleRasterizer, UvWrapMode,
};
pub use renderer::Renderer;
pub use screen::{ndc_to_screen, to_screen_space};
pub use vertex::{transform_vertices, VertexOut};
