//! # World Module
//!
//! This module provides the `World` struct, which owns a fixed grid of chunks and
//! coordinates their generation, editing and rendering.
//!
//! ## Architecture
//!
//! Chunks live in one flat vector indexed x-major (`(x * SY + y) * SZ + z`). Each chunk
//! stores the indices of its six neighbours, so block lookups that leave a chunk never
//! need to go back through the world. Grid cell `(x, y, z)` holds the chunk with
//! coordinates `(x - SX/2, y - SY/2, z - SZ/2)`, which centres the world on the origin.
//!
//! ## Generation Pacing
//!
//! Chunks start empty. Every call to [`World::render`] draws the chunks that are already
//! initialized and then initializes up to `max_chunks_initialized_per_frame` of the
//! remaining ones, closest to the centre column first. Initializing a chunk populates
//! it and its six neighbours, so a chunk is only ever meshed once everything its border
//! faces depend on exists.
//!
//! ## Buffers
//!
//! Meshes are built into a single scratch buffer and uploaded straight away. A
//! [`SlotPool`] bounds how many chunks hold a host buffer at once; chunks that lose
//! their buffer are remeshed the next time they are drawn.

use std::num::NonZeroUsize;

use cgmath::{Matrix4, Point3, Vector3};
use log::{debug, info, trace};
use web_time::Instant;

use crate::config::WorldConfig;
use crate::engine_state::rendering::{
    meshing::{
        mesh::{build_chunk_mesh, MeshScratch, MeshStats},
        SlotPool,
    },
    RenderHost,
};
use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockTypeSize, AIR},
    chunk::{chunk_creation, Chunk, ChunkMut, ChunkRef, CHUNK_DIMENSIONS, CX, CY, CZ},
    terrain::Terrain,
};
use crate::error::ConfigResult;

/// Blocks per world unit along every axis.
pub const BLOCKS_PER_UNIT: f32 = 8.0;

/// What one call to [`World::render`] did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks that issued a draw call
    pub chunks_drawn: usize,
    /// Vertices submitted across all draw calls
    pub vertices_drawn: u64,
    /// Chunks whose mesh was rebuilt
    pub meshes_rebuilt: usize,
    /// Chunks newly marked initialized
    pub chunks_initialized: usize,
}

/// A bounded voxel world made of a grid of chunks.
pub struct World {
    config: WorldConfig,
    seed: i32,
    size: [usize; 3],
    terrain: Terrain,
    chunks: Vec<Chunk>,
    slots: SlotPool,
    scratch: MeshScratch,
    /// Uninitialized chunks of the current frame with their distance from the centre.
    candidates: Vec<(f32, usize)>,
    /// Timestamp of the current frame.
    now: Instant,
}

impl World {
    /// Creates a world with every chunk allocated but not yet populated.
    ///
    /// # Arguments
    /// * `config` - World settings; validated before anything is allocated
    ///
    /// # Returns
    /// The world, or the validation error of `config`.
    pub fn new(config: WorldConfig) -> ConfigResult<Self> {
        config.validate()?;

        let seed = config.resolve_seed();
        let size = config.size;
        let [sx, sy, sz] = size;

        let mut chunks = Vec::with_capacity(config.chunk_count());
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    let position = Point3::new(
                        x as i32 - (sx / 2) as i32,
                        y as i32 - (sy / 2) as i32,
                        z as i32 - (sz / 2) as i32,
                    );
                    chunks.push(Chunk::new(position));
                }
            }
        }

        let mut world = World {
            terrain: Terrain::new(seed, config.sea_level, config.terrain.clone()),
            slots: SlotPool::new(
                NonZeroUsize::new(config.effective_slot_capacity()).unwrap_or(NonZeroUsize::MIN),
            ),
            scratch: MeshScratch::new(),
            candidates: Vec::with_capacity(chunks.len()),
            now: Instant::now(),
            chunks,
            seed,
            size,
            config,
        };
        world.link_neighbors();

        info!(
            "Created {}x{}x{} chunk world with seed {} and {} buffer slots",
            sx,
            sy,
            sz,
            seed,
            world.slots.capacity()
        );
        Ok(world)
    }

    fn link_neighbors(&mut self) {
        for index in 0..self.chunks.len() {
            let grid = self.grid_position(index);
            for side in BlockSide::all() {
                let offset = side.offset();
                let neighbor = self.chunk_index(
                    grid[0] as i32 + offset[0],
                    grid[1] as i32 + offset[1],
                    grid[2] as i32 + offset[2],
                );
                self.chunks[index].neighbors[side as usize] = neighbor;
            }
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Number of chunks along X, Y and Z.
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Read access to a chunk and its neighbourhood.
    pub fn chunk_ref(&self, index: usize) -> Option<ChunkRef<'_>> {
        (index < self.chunks.len()).then(|| ChunkRef::new(&self.chunks, index))
    }

    /// Write access to a chunk and its neighbourhood.
    pub fn chunk_mut(&mut self, index: usize) -> Option<ChunkMut<'_>> {
        (index < self.chunks.len()).then(|| ChunkMut::new(&mut self.chunks, index))
    }

    /// Index of the chunk in grid cell `(x, y, z)`, if the cell is inside the grid.
    pub fn chunk_index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let [sx, sy, sz] = self.size;
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        (x < sx && y < sy && z < sz).then(|| (x * sy + y) * sz + z)
    }

    /// Grid cell of the chunk at `index`.
    pub fn grid_position(&self, index: usize) -> [usize; 3] {
        let [_, sy, sz] = self.size;
        [index / (sy * sz), (index / sz) % sy, index % sz]
    }

    /// Finds the chunk containing world block `(x, y, z)`.
    ///
    /// # Returns
    /// The chunk index and the chunk-local coordinates, or `None` outside the world.
    pub fn locate(&self, x: i32, y: i32, z: i32) -> Option<(usize, [i32; 3])> {
        let world = [x, y, z];
        let mut grid = [0; 3];
        let mut local = [0; 3];
        for axis in 0..3 {
            let dimension = CHUNK_DIMENSIONS[axis] as i32;
            grid[axis] = world[axis].div_euclid(dimension) + (self.size[axis] / 2) as i32;
            local[axis] = world[axis].rem_euclid(dimension);
        }
        let index = self.chunk_index(grid[0], grid[1], grid[2])?;
        Some((index, local))
    }

    /// Returns the block at world coordinates, or air outside the world.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        match self.locate(x, y, z) {
            Some((index, [lx, ly, lz])) => self.chunks[index].get_local(lx, ly, lz).unwrap_or(AIR),
            None => AIR,
        }
    }

    /// Sets the block at world coordinates. Writes outside the world are dropped.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockTypeSize) {
        if let Some((index, [lx, ly, lz])) = self.locate(x, y, z) {
            ChunkMut::new(&mut self.chunks, index).set(lx, ly, lz, block);
        }
    }

    /// Runs procedural generation for one chunk, once.
    pub fn populate_chunk(&mut self, index: usize) {
        if index < self.chunks.len() {
            chunk_creation::populate(&mut self.chunks, index, &self.terrain);
        }
    }

    /// Populates a chunk and its six neighbours and marks it ready to render.
    pub fn initialize_chunk(&mut self, index: usize) {
        if index >= self.chunks.len() {
            return;
        }

        self.populate_chunk(index);
        for side in BlockSide::all() {
            if let Some(neighbor) = self.chunks[index].neighbor(side) {
                self.populate_chunk(neighbor);
            }
        }
        self.chunks[index].initialized = true;
        debug!("Initialized chunk {:?}", self.chunks[index].position);
    }

    pub fn initialized_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.initialized).count()
    }

    pub fn is_fully_initialized(&self) -> bool {
        self.chunks.iter().all(|chunk| chunk.initialized)
    }

    /// Rebuilds the mesh of a chunk into the scratch buffer and clears its `changed` flag.
    ///
    /// The new vertices live only in the scratch buffer, so the caller must upload them
    /// before the chunk's buffer is drawn again.
    ///
    /// # Returns
    /// Vertex and merge counts of the new mesh.
    fn build_mesh(&mut self, index: usize) -> MeshStats {
        let World { chunks, scratch, .. } = self;

        let started = Instant::now();
        let stats = build_chunk_mesh(ChunkRef::new(chunks, index), scratch);

        let chunk = &mut chunks[index];
        chunk.changed = false;
        chunk.vertex_count = stats.vertex_count;
        trace!(
            "Meshed chunk {:?}: {} vertices, {} merged faces in {:?}",
            chunk.position,
            stats.vertex_count,
            stats.merged_faces,
            started.elapsed()
        );
        stats
    }

    /// Model transform of a chunk: its block offset, scaled to world units.
    ///
    /// # Returns
    /// The transform, or `None` if `index` is outside the world.
    pub fn model_matrix(&self, index: usize) -> Option<Matrix4<f32>> {
        let position = self.chunks.get(index)?.position;
        Some(
            Matrix4::from_scale(1.0 / BLOCKS_PER_UNIT)
                * Matrix4::from_translation(Vector3::new(
                    (position.x * CX as i32) as f32,
                    (position.y * CY as i32) as f32,
                    (position.z * CZ as i32) as f32,
                )),
        )
    }

    /// Draws one chunk, remeshing and claiming a buffer slot as needed.
    ///
    /// # Arguments
    /// * `index` - Chunk to draw
    /// * `host` - Host receiving uploads and draw calls
    /// * `model_view_projection` - Transform bound before the draw call
    ///
    /// # Returns
    /// The number of vertices drawn; zero for empty chunks, which never claim a slot.
    fn render_chunk<H: RenderHost + ?Sized>(
        &mut self,
        index: usize,
        host: &mut H,
        model_view_projection: &Matrix4<f32>,
    ) -> u32 {
        let mut rebuilt = false;
        if self.chunks[index].changed {
            self.build_mesh(index);
            rebuilt = true;
        }

        self.chunks[index].last_used = Some(self.now);
        if self.chunks[index].vertex_count == 0 {
            return 0;
        }

        let (buffer, acquired) = match self.chunks[index].buffer {
            Some(buffer) => {
                self.slots.touch(index);
                (buffer, false)
            }
            None => {
                let grant = self.slots.acquire(index, host);
                if let Some(victim) = grant.evicted {
                    let evicted = &mut self.chunks[victim];
                    evicted.buffer = None;
                    evicted.changed = true;
                    debug!("Evicted chunk {:?} from its buffer", evicted.position);
                }
                self.chunks[index].buffer = Some(grant.buffer);
                (grant.buffer, true)
            }
        };

        if acquired && !rebuilt {
            self.build_mesh(index);
        }
        if acquired || rebuilt {
            host.upload_vertices(buffer, self.scratch.vertices());
        }

        let vertex_count = self.chunks[index].vertex_count;
        host.set_transform(model_view_projection);
        host.draw_triangles(buffer, vertex_count);
        vertex_count
    }

    /// Renders one frame and advances generation.
    ///
    /// Every initialized chunk is drawn with `view_projection` times its model matrix.
    /// Uninitialized chunks are ranked by `hypot(x - SX/2, z - SZ/2) + y` over their grid
    /// cell, and the closest ones are initialized after drawing, up to the per-frame
    /// budget. Ties go to the lower chunk index.
    pub fn render<H: RenderHost + ?Sized>(
        &mut self,
        host: &mut H,
        view_projection: &Matrix4<f32>,
    ) -> FrameStats {
        self.now = Instant::now();
        let mut stats = FrameStats::default();
        let mut candidates = std::mem::take(&mut self.candidates);
        candidates.clear();

        let [sx, _, sz] = self.size;
        let centre_x = (sx / 2) as f32;
        let centre_z = (sz / 2) as f32;

        for index in 0..self.chunks.len() {
            if !self.chunks[index].initialized {
                let [x, y, z] = self.grid_position(index);
                let distance = (x as f32 - centre_x).hypot(z as f32 - centre_z) + y as f32;
                candidates.push((distance, index));
                continue;
            }

            if self.chunks[index].changed {
                stats.meshes_rebuilt += 1;
            }
            let Some(model) = self.model_matrix(index) else {
                continue;
            };
            let model_view_projection = view_projection * model;
            let drawn = self.render_chunk(index, host, &model_view_projection);
            if drawn > 0 {
                stats.chunks_drawn += 1;
                stats.vertices_drawn += u64::from(drawn);
            }
        }

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        for &(_, index) in candidates
            .iter()
            .take(self.config.max_chunks_initialized_per_frame)
        {
            self.initialize_chunk(index);
            stats.chunks_initialized += 1;
        }
        self.candidates = candidates;

        stats
    }
}

#[cfg(test)]
mod tests {
    use cgmath::SquareMatrix;

    use super::*;
    use crate::config::TerrainConfig;
    use crate::engine_state::rendering::headless::HeadlessHost;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn world(size: [usize; 3]) -> World {
        World::new(WorldConfig {
            seed: Some(42),
            size,
            terrain: TerrainConfig {
                tree_chance: 0,
                ..TerrainConfig::default()
            },
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn chunks_are_centred_and_linked() {
        let world = world([2, 1, 2]);
        assert_eq!(world.chunk_count(), 4);
        assert_eq!(world.chunk(0).unwrap().position, Point3::new(-1, 0, -1));
        assert_eq!(world.chunk(3).unwrap().position, Point3::new(0, 0, 0));

        assert_eq!(world.grid_position(2), [1, 0, 0]);
        let first = world.chunk(0).unwrap();
        assert_eq!(first.neighbor(BlockSide::RIGHT), Some(2));
        assert_eq!(first.neighbor(BlockSide::BACK), Some(1));
        assert_eq!(first.neighbor(BlockSide::LEFT), None);
        assert_eq!(first.neighbor(BlockSide::TOP), None);
    }

    #[test]
    fn world_coordinates_map_to_chunks() {
        let world = world([2, 1, 2]);
        assert_eq!(world.locate(-1, 0, -1), Some((0, [15, 0, 15])));
        assert_eq!(world.locate(0, 31, 0), Some((3, [0, 31, 0])));
        assert_eq!(world.locate(-17, 0, 0), None);
        assert_eq!(world.locate(0, -1, 0), None);
        assert_eq!(world.locate(16, 0, 0), None);
    }

    #[test]
    fn set_and_get_use_world_coordinates() {
        let mut world = world([2, 1, 2]);
        world.set(-1, 5, 3, BlockType::BRICK.id());
        assert_eq!(world.get(-1, 5, 3), BlockType::BRICK.id());
        assert_eq!(
            world.chunk(1).unwrap().get_local(15, 5, 3),
            Some(BlockType::BRICK.id())
        );

        world.set(100, 0, 0, BlockType::BRICK.id());
        assert_eq!(world.get(100, 0, 0), AIR);
        assert_eq!(world.get(0, -40, 0), AIR);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = WorldConfig {
            size: [1, 0, 1],
            ..WorldConfig::default()
        };
        assert!(World::new(config).is_err());
    }

    #[test]
    fn initializing_populates_the_neighbourhood() {
        let mut world = world([3, 1, 3]);
        let centre = world.chunk_index(1, 0, 1).unwrap();
        world.initialize_chunk(centre);

        assert!(world.chunk(centre).unwrap().initialized);
        assert_eq!(world.initialized_count(), 1);
        let populated: Vec<usize> = (0..world.chunk_count())
            .filter(|&i| world.chunk(i).unwrap().perlinated)
            .collect();
        assert_eq!(populated.len(), 5);
        assert!(!world.chunk(world.chunk_index(0, 0, 0).unwrap()).unwrap().perlinated);
    }

    #[test]
    fn first_frame_only_initializes_the_centre() {
        let mut world = world([3, 1, 3]);
        let mut host = HeadlessHost::new();

        let stats = world.render(&mut host, &Matrix4::identity());
        assert_eq!(stats.chunks_initialized, 1);
        assert_eq!(stats.chunks_drawn, 0);
        assert!(world.chunk(world.chunk_index(1, 0, 1).unwrap()).unwrap().initialized);
        assert!(host.draws.is_empty());
    }

    #[test]
    fn rendering_uploads_once_until_the_chunk_changes() {
        let mut world = world([1, 1, 1]);
        let mut host = HeadlessHost::new();
        world.initialize_chunk(0);

        let first = world.render(&mut host, &Matrix4::identity());
        assert_eq!(first.chunks_drawn, 1);
        assert_eq!(first.meshes_rebuilt, 1);
        assert_eq!(host.uploads, 1);

        let second = world.render(&mut host, &Matrix4::identity());
        assert_eq!(second.meshes_rebuilt, 0);
        assert_eq!(host.uploads, 1);
        assert_eq!(second.vertices_drawn, first.vertices_drawn);

        world.set(0, 20, 0, BlockType::GLASS.id());
        let third = world.render(&mut host, &Matrix4::identity());
        assert_eq!(third.meshes_rebuilt, 1);
        assert_eq!(host.uploads, 2);
        assert!(third.vertices_drawn > first.vertices_drawn);
    }

    #[test]
    fn empty_chunks_never_claim_a_slot() {
        let mut world = world([1, 1, 1]);
        let mut host = HeadlessHost::new();
        world.chunks[0].initialized = true;

        let stats = world.render(&mut host, &Matrix4::identity());
        assert_eq!(stats.chunks_drawn, 0);
        assert_eq!(host.buffer_count(), 0);
        assert!(world.chunk(0).unwrap().last_used.is_some());
    }

    #[test]
    fn draw_calls_carry_the_chunk_transform() {
        let mut world = world([1, 1, 1]);
        let mut host = HeadlessHost::new();
        world.initialize_chunk(0);
        world.render(&mut host, &Matrix4::identity());

        let expected = world.model_matrix(0).unwrap();
        assert_eq!(host.draws.len(), 1);
        assert_eq!(host.draws[0].transform, expected);
        assert_eq!(
            host.vertices(host.draws[0].buffer).len() as u32,
            host.draws[0].vertex_count
        );
    }

    #[test]
    fn edits_to_a_drawn_chunk_reupload_before_drawing() {
        let mut world = world([1, 1, 1]);
        let mut host = HeadlessHost::new();
        world.initialize_chunk(0);
        world.render(&mut host, &Matrix4::identity());
        assert_eq!(host.uploads, 1);

        world.set(8, 31, 8, BlockType::BRICK.id());
        host.begin_frame();
        world.render(&mut host, &Matrix4::identity());

        assert_eq!(host.uploads, 2);
        assert_eq!(host.draws.len(), 1);
        assert_eq!(
            host.draws[0].vertex_count,
            host.vertices(host.draws[0].buffer).len() as u32
        );
    }

    #[test]
    fn model_matrix_is_none_outside_the_world() {
        let world = world([1, 1, 1]);
        assert!(world.model_matrix(0).is_some());
        assert_eq!(world.model_matrix(1), None);
    }
}
