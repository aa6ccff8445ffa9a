//! Mesh generation and buffer management for voxel rendering.
//!
//! This module handles the conversion of chunk blocks into vertex data and decides
//! which chunks may keep a vertex buffer on the host. The key goals are:
//! 1. Keep per-chunk meshes small by merging runs of identical faces
//! 2. Rebuild a mesh only when its chunk changed
//! 3. Bound the number of live buffers regardless of world size
//!
//! # Architecture
//! - `mesh/`: the greedy meshing pass and its scratch buffer
//! - [`SlotPool`]: an LRU-ordered set of buffer slots keyed by chunk index
//!
//! # Slot Reuse
//! A chunk that is rendered with a non-empty mesh claims a slot. Once the pool is full
//! the least recently rendered owner gives its buffer up and must be remeshed and
//! reuploaded the next time it is drawn.

/// Greedy meshing algorithms and data structures.
pub mod mesh;
mod slot_pool;

pub use slot_pool::{SlotGrant, SlotPool};
