//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense 16x32x16 grid of block ids that
//! is the unit of procedural generation, meshing and GPU buffer allocation.
//!
//! ## Neighbour Links
//!
//! Chunks never own each other. Each chunk stores the indices of its six neighbours
//! in the world's flat chunk array (or `None` at the edge of the world). Coordinates
//! outside `0..dimension` are redirected through those links, so a chunk can read and
//! write across its own boundary:
//!
//! * [`ChunkRef`] borrows the chunk array immutably and answers block lookups and
//!   visibility queries.
//! * [`ChunkMut`] borrows it mutably and applies edits, marking every chunk whose
//!   mesh may change as dirty.
//!
//! Reads that leave the world return air and writes that leave the world are
//! dropped; neither is an error.

use cgmath::Point3;
use web_time::Instant;

use super::block::block_side::BlockSide;
use super::block::block_type::{SEE_THROUGH_CLASS, TRANSPARENCY};
use super::block::{BlockTypeSize, AIR};
use crate::engine_state::rendering::BufferHandle;

pub mod chunk_creation;

/// Width of a chunk in blocks (X axis).
pub const CX: usize = 16;
/// Height of a chunk in blocks (Y axis).
pub const CY: usize = 32;
/// Depth of a chunk in blocks (Z axis).
pub const CZ: usize = 16;
/// Chunk dimensions indexed by axis.
pub const CHUNK_DIMENSIONS: [usize; 3] = [CX, CY, CZ];
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CX * CY * CZ;

/// Represents a 16x32x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// Block ids stored x-major, then y, then z.
    blocks: Box<[BlockTypeSize]>,

    /// Index of the neighbouring chunk on each side, indexed by `BlockSide`.
    pub(crate) neighbors: [Option<usize>; 6],

    /// The mesh no longer matches the blocks and must be rebuilt before drawing.
    pub changed: bool,

    /// Procedural population has run.
    pub perlinated: bool,

    /// The world has scheduled this chunk and its neighbours for generation, so it is
    /// drawn from now on.
    pub initialized: bool,

    /// GPU buffer currently assigned to this chunk by the slot pool.
    pub buffer: Option<BufferHandle>,

    /// Number of vertices in the most recently built mesh.
    pub vertex_count: u32,

    /// When this chunk was last rendered. Informational only; eviction order is kept
    /// by the slot pool.
    pub last_used: Option<Instant>,
}

impl Chunk {
    /// Creates an empty, unpopulated chunk at the given chunk coordinates.
    pub fn new(position: Point3<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![AIR; CHUNK_SIZE].into_boxed_slice(),
            neighbors: [None; 6],
            changed: true,
            perlinated: false,
            initialized: false,
            buffer: None,
            vertex_count: 0,
            last_used: None,
        }
    }

    fn offset(x: usize, y: usize, z: usize) -> usize {
        (x * CY + y) * CZ + z
    }

    fn local(x: i32, y: i32, z: i32) -> Option<(usize, usize, usize)> {
        let inside = |v: i32, dim: usize| v >= 0 && (v as usize) < dim;
        if inside(x, CX) && inside(y, CY) && inside(z, CZ) {
            Some((x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Reads a block inside this chunk without following neighbour links.
    ///
    /// # Returns
    /// The block id, or `None` if the coordinates are outside the chunk.
    pub fn get_local(&self, x: i32, y: i32, z: i32) -> Option<BlockTypeSize> {
        Self::local(x, y, z).map(|(x, y, z)| self.blocks[Self::offset(x, y, z)])
    }

    /// Writes a block inside this chunk without any dirty tracking.
    pub(crate) fn put_local(&mut self, x: usize, y: usize, z: usize, block: BlockTypeSize) {
        self.blocks[Self::offset(x, y, z)] = block;
    }

    /// Index of the neighbouring chunk on `side`, if there is one.
    pub fn neighbor(&self, side: BlockSide) -> Option<usize> {
        self.neighbors[side as usize]
    }

    /// Block ids in storage order.
    pub fn blocks(&self) -> &[BlockTypeSize] {
        &self.blocks
    }
}

/// Follows neighbour links until `(x, y, z)` lands inside a chunk.
///
/// The X axis is resolved first, then Y, then Z. Returns the index of the chunk that
/// holds the block and the local coordinates inside it, or `None` once a link is
/// missing.
pub(crate) fn resolve(
    chunks: &[Chunk],
    mut index: usize,
    x: i32,
    y: i32,
    z: i32,
) -> Option<(usize, usize, usize, usize)> {
    let mut p = [x, y, z];
    loop {
        let side = if p[0] < 0 {
            BlockSide::LEFT
        } else if p[0] >= CX as i32 {
            BlockSide::RIGHT
        } else if p[1] < 0 {
            BlockSide::BOTTOM
        } else if p[1] >= CY as i32 {
            BlockSide::TOP
        } else if p[2] < 0 {
            BlockSide::FRONT
        } else if p[2] >= CZ as i32 {
            BlockSide::BACK
        } else {
            return Some((index, p[0] as usize, p[1] as usize, p[2] as usize));
        };

        index = chunks[index].neighbors[side as usize]?;
        let dimension = CHUNK_DIMENSIONS[side.axis()] as i32;
        if side.is_positive() {
            p[side.axis()] -= dimension;
        } else {
            p[side.axis()] += dimension;
        }
    }
}

/// Read access to one chunk and, through its links, to its neighbours.
#[derive(Clone, Copy)]
pub struct ChunkRef<'a> {
    chunks: &'a [Chunk],
    index: usize,
}

impl<'a> ChunkRef<'a> {
    pub fn new(chunks: &'a [Chunk], index: usize) -> Self {
        ChunkRef { chunks, index }
    }

    /// The chunk itself.
    pub fn chunk(&self) -> &'a Chunk {
        &self.chunks[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the block at chunk-relative coordinates.
    ///
    /// Coordinates outside the chunk are looked up in the neighbouring chunk; if that
    /// neighbour does not exist the block is air.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        match resolve(self.chunks, self.index, x, y, z) {
            Some((index, x, y, z)) => self.chunks[index].blocks[Chunk::offset(x, y, z)],
            None => AIR,
        }
    }

    /// Whether the face of block 1 that looks towards block 2 is hidden.
    ///
    /// * An empty block 1 has no face, so it is always blocked.
    /// * Leaves never block anything, not even other leaves.
    /// * Opaque blocks always block.
    /// * Any other transparent block only blocks blocks of its own transparency class.
    ///
    /// The relation is not symmetric: air next to stone is blocked, while stone next to
    /// air is not.
    pub fn is_blocked(&self, x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> bool {
        let source = self.get(x1, y1, z1);
        if source == AIR {
            return true;
        }

        let target_class = TRANSPARENCY[self.get(x2, y2, z2) as usize & 0xf];
        if target_class == SEE_THROUGH_CLASS {
            return false;
        }
        if target_class == 0 {
            return true;
        }

        target_class == TRANSPARENCY[source as usize & 0xf]
    }
}

/// Write access to one chunk and, through its links, to its neighbours.
pub struct ChunkMut<'a> {
    chunks: &'a mut [Chunk],
    index: usize,
}

impl<'a> ChunkMut<'a> {
    pub fn new(chunks: &'a mut [Chunk], index: usize) -> Self {
        ChunkMut { chunks, index }
    }

    /// Reborrows as a read-only view.
    pub fn view(&self) -> ChunkRef<'_> {
        ChunkRef::new(self.chunks, self.index)
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        self.view().get(x, y, z)
    }

    /// Sets the block at chunk-relative coordinates.
    ///
    /// Out-of-range coordinates are redirected like [`ChunkRef::get`]; writes that
    /// leave the world are dropped. The chunk that receives the block is marked as
    /// changed, and so is every neighbour that shares the face the block sits on.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockTypeSize) {
        let Some((index, x, y, z)) = resolve(self.chunks, self.index, x, y, z) else {
            return;
        };

        let chunk = &mut self.chunks[index];
        chunk.put_local(x, y, z, block);
        chunk.changed = true;

        let local = [x, y, z];
        let mut touched = [None; 6];
        for side in BlockSide::all() {
            let edge = if side.is_positive() {
                CHUNK_DIMENSIONS[side.axis()] - 1
            } else {
                0
            };
            if local[side.axis()] == edge {
                touched[side as usize] = chunk.neighbors[side as usize];
            }
        }

        for neighbor in touched.into_iter().flatten() {
            self.chunks[neighbor].changed = true;
        }
    }
}
