//! # Rendering Module
//!
//! The narrow interface between the voxel world and whatever actually talks to the GPU.
//!
//! The world never issues graphics API calls itself. It asks a [`RenderHost`] to
//! allocate vertex buffers, to upload chunk meshes into them and to draw them, and it
//! asks a [`DepthReadback`] for the depth under the cursor when picking blocks.
//! Shader compilation, textures and the window all live on the host side.
//!
//! ## Key Components
//!
//! * [`Vertex`] - the packed 4-byte chunk vertex
//! * [`meshing`] - greedy chunk meshing and the buffer slot pool
//! * [`headless::HeadlessHost`] - an in-memory host

use cgmath::Matrix4;

pub mod headless;
pub mod meshing;
mod vertex;

pub use vertex::{Vertex, HORIZONTAL_FACE_FLAG};

/// Identifies a vertex buffer owned by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

/// GPU operations the world needs from its host.
pub trait RenderHost {
    /// Creates a new, empty vertex buffer.
    fn allocate_buffer(&mut self) -> BufferHandle;

    /// Replaces the contents of `buffer` with `vertices`.
    fn upload_vertices(&mut self, buffer: BufferHandle, vertices: &[Vertex]);

    /// Binds the transform used by the following draw calls.
    fn set_transform(&mut self, model_view_projection: &Matrix4<f32>);

    /// Draws `vertex_count` vertices of `buffer` as a triangle list with the bound
    /// shader program and transform.
    fn draw_triangles(&mut self, buffer: BufferHandle, vertex_count: u32);
}

/// Depth buffer access used for block picking.
pub trait DepthReadback {
    /// Window-space depth (0..1) at pixel `(x, y)`, or `None` if unavailable.
    fn read_depth(&mut self, x: u32, y: u32) -> Option<f32>;
}
