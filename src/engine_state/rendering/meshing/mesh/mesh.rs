//! Scratch storage for chunk meshes.

use crate::engine_state::{
    rendering::Vertex,
    voxels::chunk::CHUNK_SIZE,
};

use super::face::FaceTemplate;

/// Worst-case vertex count of one chunk: every block showing all six faces as two
/// triangles each.
pub const MAX_CHUNK_VERTICES: usize = CHUNK_SIZE * 6 * 6;

/// A vertex buffer large enough for any chunk mesh.
///
/// One scratch is allocated per world and reused for every rebuild; only the first
/// `len` vertices, exposed by [`MeshScratch::vertices`], belong to the last built mesh.
pub struct MeshScratch {
    vertices: Box<[Vertex]>,
    len: usize,
}

impl MeshScratch {
    pub fn new() -> Self {
        MeshScratch {
            vertices: vec![Vertex::default(); MAX_CHUNK_VERTICES].into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of vertices written since the last `clear`.
    pub(super) fn len(&self) -> usize {
        self.len
    }

    pub(super) fn clear(&mut self) {
        self.len = 0;
    }

    /// The vertices of the current mesh.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.len]
    }

    /// Appends a full quad for the block at `base`.
    pub(super) fn push_quad(&mut self, template: &FaceTemplate, base: [u8; 3], material: u8) {
        for corner in 0..6 {
            self.vertices[self.len + corner] = Vertex::new(template.corner(corner, base), material);
        }
        self.len += 6;
    }

    /// Stretches the last quad so it also covers the block at `base`.
    pub(super) fn extend_last_quad(&mut self, template: &FaceTemplate, base: [u8; 3]) {
        let start = self.len - 6;
        for corner in 0..6 {
            if template.stretches(corner) {
                let material = self.vertices[start + corner].material;
                self.vertices[start + corner] = Vertex::new(template.corner(corner, base), material);
            }
        }
    }
}

impl Default for MeshScratch {
    fn default() -> Self {
        Self::new()
    }
}
