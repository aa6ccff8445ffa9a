//! Vertex data structures for voxel rendering.
//!
//! This module defines the packed vertex format shared with the host's chunk shader.

/// Set on the material byte of faces whose normal lies on the Y axis (top and bottom
/// faces). The shader uses it to pick the cap texture and to shade horizontal faces.
pub const HORIZONTAL_FACE_FLAG: u8 = 0x80;

/// A vertex in the chunk rendering pipeline.
///
/// # Memory Layout
/// - Position: 3x u8 in chunk-local block units (0..=32)
/// - Material: u8, the block id in bits 0-6 plus [`HORIZONTAL_FACE_FLAG`]
///
/// Total size: 4 bytes, read by the shader as one 4-component byte attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub material: u8,
}

impl Vertex {
    pub fn new(position: [u8; 3], material: u8) -> Self {
        Vertex {
            x: position[0],
            y: position[1],
            z: position[2],
            material,
        }
    }

    pub fn position(&self) -> [u8; 3] {
        [self.x, self.y, self.z]
    }

    /// Material id without the orientation flag.
    pub fn material_id(&self) -> u8 {
        self.material & !HORIZONTAL_FACE_FLAG
    }

    pub fn is_horizontal(&self) -> bool {
        self.material & HORIZONTAL_FACE_FLAG != 0
    }
}
