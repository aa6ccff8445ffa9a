//! # Block Module
//!
//! This module provides the block-related definitions of the voxel world: block ids,
//! their material table and the six block faces.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block ids in memory.
///
/// Ids range over `0..16`; `0` is air.
pub type BlockTypeSize = u8;

/// Id of an empty cell.
pub const AIR: BlockTypeSize = 0;
