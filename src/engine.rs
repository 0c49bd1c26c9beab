//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns the
//! scene (meshes, material, light, camera) and runs the per-frame pipeline:
//!
//! 1. Clear the color buffer and reset the depth buffer
//! 2. Per mesh: build world-view-projection, run the vertex stage, map to
//!    raster space, rasterize every triangle

use std::path::Path;

use log::info;

use crate::camera::{Camera, CameraInput, DEFAULT_FOV_DEGREES};
use crate::colors::{self, ColorRgb};
use crate::light::DirectionalLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{LoadError, Mesh, PrimitiveTopology, Vertex};
use crate::render::{
    to_screen_space, transform_vertices, Material, MaterialShader, RasterSettings, Renderer,
    ShadingMode, TriangleRasterizer,
};
use crate::texture::Texture;

/// Camera origin for a freshly created engine.
pub const DEFAULT_CAMERA_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, -10.0);

/// Default mesh rotation speed in radians per second.
const DEFAULT_ROTATION_SPEED: f32 = 1.0;

pub struct Engine {
    renderer: Renderer,
    rasterizer: TriangleRasterizer,
    camera: Camera,
    meshes: Vec<Mesh>,
    material: Material,
    light: DirectionalLight,
    shading_mode: ShadingMode,
    normal_mapping: bool,
    rotate: bool,
    pub rotation_speed: f32,
    pub background: u32,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height.max(1) as f32;

        Self {
            renderer: Renderer::new(width, height),
            rasterizer: TriangleRasterizer::default(),
            camera: Camera::new(DEFAULT_CAMERA_ORIGIN, DEFAULT_FOV_DEGREES, aspect_ratio),
            meshes: Vec::new(),
            material: Material::default(),
            light: DirectionalLight::default(),
            shading_mode: ShadingMode::default(),
            normal_mapping: true,
            rotate: false,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            background: colors::BACKGROUND,
        }
    }

    // =========================================================================
    // Scene setup
    // =========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) {
        info!(
            "Added mesh '{}' ({} vertices, {:?})",
            mesh.name(),
            mesh.vertices().len(),
            mesh.topology()
        );
        self.meshes.push(mesh);
    }

    pub fn load_mesh<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let mesh = Mesh::from_obj(path)?;
        self.add_mesh(mesh);
        Ok(())
    }

    /// Loads the four material textures from disk.
    pub fn load_material<P: AsRef<Path>>(
        &mut self,
        diffuse: P,
        normal: P,
        specular: P,
        gloss: P,
    ) -> Result<(), LoadError> {
        self.material = Material::new(
            Texture::from_file(diffuse)?,
            Texture::from_file(normal)?,
            Texture::from_file(specular)?,
            Texture::from_file(gloss)?,
        );
        Ok(())
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Replaces the scene with a textured quad built as a triangle strip.
    pub fn load_demo_scene(&mut self) -> Result<(), LoadError> {
        self.meshes.clear();
        self.add_mesh(demo_quad()?);
        self.set_material(demo_material());
        Ok(())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
    }

    // =========================================================================
    // Toggles
    // =========================================================================

    pub fn settings(&self) -> &RasterSettings {
        self.rasterizer.settings()
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading_mode
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading_mode = mode;
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode: {}", self.shading_mode);
    }

    pub fn normal_mapping(&self) -> bool {
        self.normal_mapping
    }

    pub fn toggle_normal_mapping(&mut self) {
        self.normal_mapping = !self.normal_mapping;
        info!("Normal mapping: {}", on_off(self.normal_mapping));
    }

    pub fn toggle_rotation(&mut self) {
        self.rotate = !self.rotate;
        info!("Rotation: {}", on_off(self.rotate));
    }

    pub fn toggle_depth_display(&mut self) {
        let settings = self.rasterizer.settings_mut();
        settings.display_depth = !settings.display_depth;
        info!("Depth buffer display: {}", on_off(settings.display_depth));
    }

    pub fn toggle_uv_wrap(&mut self) {
        let settings = self.rasterizer.settings_mut();
        settings.uv_wrap = settings.uv_wrap.toggle();
        info!("UV wrap mode: {:?}", settings.uv_wrap);
    }

    pub fn toggle_frustum_policy(&mut self) {
        let settings = self.rasterizer.settings_mut();
        settings.frustum = settings.frustum.toggle();
        info!("Frustum policy: {}", settings.frustum);
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advances the camera and, when enabled, spins every mesh around its Y axis.
    ///
    /// `delta_time` is in seconds.
    pub fn update(&mut self, input: &CameraInput, delta_time: f32) {
        self.camera.apply(input);

        if self.rotate {
            let angle = self.rotation_speed * delta_time;
            for mesh in &mut self.meshes {
                mesh.rotate_y(angle);
            }
        }
    }

    /// Renders the current frame into the color buffer. Returns the number of
    /// pixels written.
    pub fn render(&mut self) -> usize {
        self.renderer.clear(self.background);
        self.renderer.reset_depth();

        let (width, height) = (self.renderer.width(), self.renderer.height());
        let view_projection = self.camera.view_projection_matrix();
        let shader = MaterialShader::new(
            &self.light,
            &self.material,
            self.shading_mode,
            self.normal_mapping,
        );
        let mut buffer = self.renderer.as_framebuffer();
        let mut written = 0;

        for mesh in &mut self.meshes {
            let world = mesh.world_matrix();
            let (vertices, triangles) = mesh.parts_mut();

            let vertices_out = transform_vertices(vertices, view_projection * world, world);
            let screen = to_screen_space(&vertices_out, width, height);
            written += self.rasterizer.render_mesh(
                triangles,
                &vertices_out,
                &screen,
                &mut buffer,
                &shader,
            );
        }

        written
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn save_screenshot<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.renderer.save_bmp(path)
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// A 2x2 quad facing the default camera, as a 6-vertex triangle strip.
///
/// Vertices are laid out in two rows (top row 0..=2, bottom row 3..=5) so the
/// strip `[3, 0, 4, 1, 5, 2]` zigzags across it.
fn demo_quad() -> Result<Mesh, LoadError> {
    let normal = -Vec3::UNIT_Z;
    let tangent = Vec3::UNIT_X;
    let vertex = |x: f32, y: f32, u: f32, v: f32| {
        Vertex::new(Vec3::new(x, y, 0.0), Vec2::new(u, v), normal, tangent)
    };

    let vertices = vec![
        vertex(-3.0, 3.0, 0.0, 0.0),
        vertex(0.0, 3.0, 0.5, 0.0),
        vertex(3.0, 3.0, 1.0, 0.0),
        vertex(-3.0, -3.0, 0.0, 1.0),
        vertex(0.0, -3.0, 0.5, 1.0),
        vertex(3.0, -3.0, 1.0, 1.0),
    ];
    Mesh::new(
        "demo_quad",
        vertices,
        vec![3, 0, 4, 1, 5, 2],
        PrimitiveTopology::TriangleStrip,
    )
}

fn demo_material() -> Material {
    let orange = ColorRgb::new(0.9, 0.45, 0.1);
    let cream = ColorRgb::new(0.95, 0.9, 0.8);
    Material::new(
        Texture::checker(256, 8, orange, cream),
        Texture::solid(ColorRgb::new(0.5, 0.5, 1.0)),
        Texture::checker(256, 8, ColorRgb::gray(0.2), ColorRgb::gray(0.8)),
        Texture::solid(ColorRgb::gray(0.6)),
    )
}
