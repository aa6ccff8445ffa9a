//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's block data into a flat triangle list of
//! [`Vertex`](crate::engine_state::rendering::Vertex) values, merging runs of identical
//! faces along one axis per pass so long walls and floors become a single quad.
//!
//! # Architecture
//! - [`FaceTemplate`]: per-side corner layout and sweep order
//! - [`MeshScratch`]: the reusable worst-case vertex buffer meshes are written into
//! - [`build_chunk_mesh`]: the greedy pass over all six sides
//!
//! # Usage
//! ```no_run
//! use cgmath::Point3;
//! use glescraft::engine_state::{
//!     rendering::meshing::mesh::{build_chunk_mesh, MeshScratch},
//!     voxels::chunk::{Chunk, ChunkRef},
//! };
//!
//! let chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
//! let mut scratch = MeshScratch::new();
//! let stats = build_chunk_mesh(ChunkRef::new(&chunks, 0), &mut scratch);
//! assert_eq!(stats.vertex_count, 0);
//! ```

mod face;
mod greedy;
mod mesh;

pub use face::{FaceTemplate, FACE_TEMPLATES};
pub use greedy::{build_chunk_mesh, MeshStats};
pub use mesh::{MeshScratch, MAX_CHUNK_VERTICES};
