//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block. The same enum names
//! a chunk's six neighbours, since the neighbour on a given side is the chunk that
//! shares that face.

/// Represents the six possible faces of a voxel block.
///
/// The discriminants follow the order of the meshing passes:
/// [LEFT, RIGHT, BOTTOM, TOP, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The left face (facing negative X)
    LEFT = 0,

    /// The right face (facing positive X)
    RIGHT = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The front face (facing negative Z)
    FRONT = 4,

    /// The back face (facing positive Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in meshing order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Axis this face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        self as usize / 2
    }

    /// Whether the outward normal points along the positive axis.
    pub fn is_positive(self) -> bool {
        self as usize % 2 == 1
    }

    /// Unit step from a block to the neighbour across this face.
    pub fn offset(self) -> [i32; 3] {
        let mut offset = [0; 3];
        offset[self.axis()] = if self.is_positive() { 1 } else { -1 };
        offset
    }
}
