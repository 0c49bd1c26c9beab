//! Mesh data: vertices, triangle topology and a world transform.
//!
//! Meshes are built once at scene setup, either from an OBJ file through
//! [`Mesh::from_obj`] or from literal vertex/index arrays, and then persist
//! for the whole run.

pub mod topology;

use std::path::Path;

use log::{info, warn};

use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

pub use topology::{PrimitiveTopology, TriangleIndices};

/// Error returned when mesh or texture assets cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("mesh '{0}' contains no triangles")]
    EmptyMesh(String),
    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// A model-space vertex with the attributes the shader consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, uv: Vec2, normal: Vec3, tangent: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
            tangent,
        }
    }
}

/// A triangle mesh with its own world transform.
///
/// The mesh exclusively owns its [`TriangleIndices`], which in turn owns the
/// index buffer. Replacing the indices through [`Mesh::set_indices`] rebuilds
/// the iterator.
#[derive(Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    triangles: TriangleIndices,
    world_matrix: Mat4,
}

impl Mesh {
    /// Creates a mesh after checking every index against the vertex count.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        let triangles = build_triangles(&name, indices, topology, vertices.len())?;

        Ok(Self {
            name,
            vertices,
            triangles,
            world_matrix: Mat4::identity(),
        })
    }

    /// Loads every object in an OBJ file into a single triangle-list mesh.
    ///
    /// V coordinates are flipped to a top-left texture origin. Missing normals
    /// default to +Y with a warning; tangents are always derived from the UV
    /// layout.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        info!("Loading OBJ file: {}", path.display());

        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &load_options)?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let offset = vertices.len() as u32;
            let vertex_count = mesh.positions.len() / 3;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            let has_texcoords = mesh.texcoords.len() / 2 == vertex_count;

            if !has_normals {
                warn!("Object '{}' has no normals, using +Y", model.name);
            }

            for i in 0..vertex_count {
                let position = Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );
                let normal = if has_normals {
                    Vec3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vec3::UNIT_Y
                };
                let uv = if has_texcoords {
                    Vec2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
                } else {
                    Vec2::ZERO
                };
                vertices.push(Vertex::new(position, uv, normal, Vec3::ZERO));
            }

            indices.extend(mesh.indices.iter().map(|&index| index + offset));
        }

        compute_tangents(&mut vertices, &indices);

        info!(
            "OBJ loaded: {} objects, {} vertices, {} indices",
            models.len(),
            vertices.len(),
            indices.len()
        );

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, vertices, indices, PrimitiveTopology::TriangleList)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        self.triangles.indices()
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.triangles.topology()
    }

    /// Replaces the index buffer and rebuilds the triangle iterator. On error
    /// the previous indices are kept.
    pub fn set_indices(
        &mut self,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
    ) -> Result<(), LoadError> {
        self.triangles = build_triangles(&self.name, indices, topology, self.vertices.len())?;
        Ok(())
    }

    pub fn triangles_mut(&mut self) -> &mut TriangleIndices {
        &mut self.triangles
    }

    /// Splits the mesh into its vertices and its triangle iterator so both can
    /// be used at once.
    pub fn parts_mut(&mut self) -> (&[Vertex], &mut TriangleIndices) {
        (&self.vertices, &mut self.triangles)
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn set_world_matrix(&mut self, world_matrix: Mat4) {
        self.world_matrix = world_matrix;
    }

    /// Rotates the mesh around its own Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.world_matrix = self.world_matrix * Mat4::rotation_y(angle);
    }
}

/// Checks every index against the vertex count and requires at least one
/// triangle.
fn build_triangles(
    name: &str,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    vertex_count: usize,
) -> Result<TriangleIndices, LoadError> {
    if let Some(&index) = indices.iter().find(|&&index| index as usize >= vertex_count) {
        return Err(LoadError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    let triangles = TriangleIndices::new(indices, topology);
    if triangles.triangle_count() == 0 {
        return Err(LoadError::EmptyMesh(name.to_string()));
    }
    Ok(triangles)
}

/// Derives per-vertex tangents from UV gradients of each list triangle.
///
/// Tangents are accumulated over every triangle sharing a vertex and then
/// orthogonalized against the vertex normal.
fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let diff_x = Vec2::new(v1.uv.x - v0.uv.x, v2.uv.x - v0.uv.x);
        let diff_y = Vec2::new(v1.uv.y - v0.uv.y, v2.uv.y - v0.uv.y);
        let det = diff_x.x * diff_y.y - diff_x.y * diff_y.x;
        if det.abs() < f32::EPSILON {
            continue;
        }

        let tangent = (edge0 * diff_y.y - edge1 * diff_y.x) / det;
        accumulated[i0] += tangent;
        accumulated[i1] += tangent;
        accumulated[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let normal = vertex.normal;
        vertex.tangent = (tangent - normal * normal.dot(tangent)).normalize();
    }
}
