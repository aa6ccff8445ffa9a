//! # Voxel Engine Core
//!
//! This module contains the core voxel engine functionality: representing, generating,
//! editing and drawing a bounded block world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block ids, names, transparency classes and face materials
//! * **Chunk**: Fixed-size 3D arrays of blocks linked to their six neighbours by index
//! * **Noise**: Deterministic lattice and fractal noise
//! * **Terrain**: The column and band rules that turn noise into blocks
//! * **World**: Owns every chunk, paces generation and drives rendering
//!
//! ## Data Flow
//!
//! 1. `World::render` walks the chunk grid once per frame
//! 2. Initialized chunks rebuild their mesh if they changed and are drawn
//! 3. The uninitialized chunk closest to the centre is populated along with its neighbours
//! 4. Edits through `World::set` mark the touched chunks for remeshing
//!
//! ## Failure Semantics
//!
//! Nothing in here returns an error. Reads outside the world yield air and writes
//! outside the world are dropped, so tree planting and picking near the edge are safe.

pub mod block;
pub mod chunk;
pub mod noise;
pub mod terrain;
pub mod world;
