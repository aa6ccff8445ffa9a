use crate::engine_state::{
    rendering::HORIZONTAL_FACE_FLAG,
    voxels::block::{block_side::BlockSide, block_type::FaceMaterials, BlockTypeSize},
};

/// Layout of one face side: which corners make up its two triangles and in which order
/// the chunk is swept when meshing it.
///
/// Corners are unit-cube offsets added to the block position. The sweep names the three
/// axes from outermost to innermost loop; faces are only merged along the innermost one,
/// so the corners with a 1 on that axis are the ones stretched by a merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTemplate {
    /// Which side of the block this face represents
    pub side: BlockSide,
    /// Corner offsets of the two counter-clockwise triangles
    pub corners: [[u8; 3]; 6],
    /// Axes from outermost to innermost loop
    pub sweep: [usize; 3],
    /// Whether each loop of `sweep` runs from the high end down
    pub descending: [bool; 3],
}

/// Templates for all six sides, in meshing order.
pub static FACE_TEMPLATES: [FaceTemplate; 6] = [
    FaceTemplate {
        side: BlockSide::LEFT,
        corners: [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 0], [0, 0, 1], [0, 1, 1]],
        sweep: [0, 1, 2],
        descending: [true, false, false],
    },
    FaceTemplate {
        side: BlockSide::RIGHT,
        corners: [[1, 0, 0], [1, 1, 0], [1, 0, 1], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
        sweep: [0, 1, 2],
        descending: [false, false, false],
    },
    FaceTemplate {
        side: BlockSide::BOTTOM,
        corners: [[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        sweep: [0, 1, 2],
        descending: [false, true, false],
    },
    FaceTemplate {
        side: BlockSide::TOP,
        corners: [[0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 1, 0], [0, 1, 1], [1, 1, 1]],
        sweep: [0, 1, 2],
        descending: [false, false, false],
    },
    FaceTemplate {
        side: BlockSide::FRONT,
        corners: [[0, 0, 0], [0, 1, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
        sweep: [0, 2, 1],
        descending: [false, true, false],
    },
    FaceTemplate {
        side: BlockSide::BACK,
        corners: [[0, 0, 1], [1, 0, 1], [0, 1, 1], [0, 1, 1], [1, 0, 1], [1, 1, 1]],
        sweep: [0, 2, 1],
        descending: [false, false, false],
    },
];

impl FaceTemplate {
    /// The axis faces are merged along.
    pub fn inner_axis(&self) -> usize {
        self.sweep[2]
    }

    /// Position of corner `corner` for the block at `base`.
    ///
    /// # Arguments
    /// * `corner` - Index into [`FaceTemplate::corners`]
    /// * `base` - Chunk-local block position
    pub fn corner(&self, corner: usize, base: [u8; 3]) -> [u8; 3] {
        let offset = self.corners[corner];
        [
            base[0] + offset[0],
            base[1] + offset[1],
            base[2] + offset[2],
        ]
    }

    /// Whether a merge moves this corner to the newly covered block.
    pub fn stretches(&self, corner: usize) -> bool {
        self.corners[corner][self.inner_axis()] == 1
    }

    /// Material byte written into the vertices of this side.
    ///
    /// Side faces carry the side material. Bottom and top faces carry their cap material
    /// with [`HORIZONTAL_FACE_FLAG`] set.
    pub fn material(&self, materials: FaceMaterials) -> BlockTypeSize {
        match self.side {
            BlockSide::BOTTOM => materials.bottom | HORIZONTAL_FACE_FLAG,
            BlockSide::TOP => materials.top | HORIZONTAL_FACE_FLAG,
            _ => materials.side,
        }
    }
}
