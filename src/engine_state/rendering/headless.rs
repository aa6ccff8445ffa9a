//! An in-memory [`RenderHost`] that keeps uploaded vertex data and records draw calls
//! instead of talking to a GPU. Used by the headless binary and by tests.

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};

use super::{BufferHandle, DepthReadback, RenderHost, Vertex};

/// A draw call issued by the world.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub buffer: BufferHandle,
    pub vertex_count: u32,
    /// Model-view-projection transform bound when the call was made.
    pub transform: Matrix4<f32>,
}

/// Headless rendering host.
pub struct HeadlessHost {
    next_buffer: u32,
    buffers: HashMap<BufferHandle, Vec<u8>>,
    transform: Matrix4<f32>,
    /// Draw calls issued since the last [`HeadlessHost::begin_frame`].
    pub draws: Vec<DrawCall>,
    /// Total number of uploads performed.
    pub uploads: usize,
    /// Depth returned by [`DepthReadback::read_depth`].
    pub depth: Option<f32>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        HeadlessHost {
            next_buffer: 1,
            buffers: HashMap::new(),
            transform: Matrix4::identity(),
            draws: Vec::new(),
            uploads: 0,
            depth: None,
        }
    }

    /// Forgets the draw calls of the previous frame.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    /// Number of buffers allocated so far.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Vertices most recently uploaded to `buffer`.
    pub fn vertices(&self, buffer: BufferHandle) -> &[Vertex] {
        self.buffers
            .get(&buffer)
            .map(|bytes| bytemuck::cast_slice(bytes.as_slice()))
            .unwrap_or(&[])
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderHost for HeadlessHost {
    fn allocate_buffer(&mut self) -> BufferHandle {
        let handle = BufferHandle(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.insert(handle, Vec::new());
        handle
    }

    fn upload_vertices(&mut self, buffer: BufferHandle, vertices: &[Vertex]) {
        let data = self.buffers.entry(buffer).or_default();
        data.clear();
        data.extend_from_slice(bytemuck::cast_slice(vertices));
        self.uploads += 1;
    }

    fn set_transform(&mut self, model_view_projection: &Matrix4<f32>) {
        self.transform = *model_view_projection;
    }

    fn draw_triangles(&mut self, buffer: BufferHandle, vertex_count: u32) {
        self.draws.push(DrawCall {
            buffer,
            vertex_count,
            transform: self.transform,
        });
    }
}

impl DepthReadback for HeadlessHost {
    fn read_depth(&mut self, _x: u32, _y: u32) -> Option<f32> {
        self.depth
    }
}
