//! # Chunk Creation Module
//!
//! Procedural population of a chunk. Population runs at most once per chunk and
//! fills every column from the bottom of the chunk up to the surface; trees planted on
//! the surface may reach into neighbouring chunks through the redirecting setter.

use log::debug;

use super::{Chunk, ChunkMut, CX, CY, CZ};
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::block::AIR;
use crate::engine_state::voxels::terrain::Terrain;

/// Radius of the cube scanned for leaves around the top of a trunk.
const CANOPY_RADIUS: i32 = 3;

/// Populates the chunk at `index` from the terrain.
///
/// Does nothing if the chunk has already been populated.
pub fn populate(chunks: &mut [Chunk], index: usize, terrain: &Terrain) {
    if chunks[index].perlinated {
        return;
    }
    chunks[index].perlinated = true;

    let position = chunks[index].position;
    let base_x = position.x * CX as i32;
    let base_y = position.y * CY as i32;
    let base_z = position.z * CZ as i32;
    let mut rng = terrain.chunk_rng(position);
    let mut trees = 0;

    for x in 0..CX {
        for z in 0..CZ {
            let wx = base_x + x as i32;
            let wz = base_z + z as i32;
            let column = terrain.column(wx, wz);

            for y in 0..CY {
                let wy = base_y + y as i32;
                match terrain.block_at(column, wx, wy, wz) {
                    Some(block) => chunks[index].put_local(x, y, z, block.id()),
                    None => {
                        let mut chunk = ChunkMut::new(chunks, index);
                        let (x, y, z) = (x as i32, y as i32, z as i32);
                        if chunk.get(x, y - 1, z) == BlockType::GRASS.id()
                            && terrain.roll_tree(&mut rng)
                        {
                            plant_tree(&mut chunk, x, y, z, &mut rng);
                            trees += 1;
                        }
                        break;
                    }
                }
            }
        }
    }

    chunks[index].changed = true;
    debug!(
        "Populated chunk {:?} ({} trees)",
        (position.x, position.y, position.z),
        trees
    );
}

/// Grows a wood trunk upwards from `(x, y, z)` and a roughly spherical canopy of
/// leaves around its top. Leaves never replace existing blocks.
fn plant_tree(chunk: &mut ChunkMut<'_>, x: i32, y: i32, z: i32, rng: &mut fastrand::Rng) {
    let trunk = rng.i32(3..=6);
    for i in 0..trunk {
        chunk.set(x, y + i, z, BlockType::WOOD.id());
    }

    let top = y + trunk;
    for ix in -CANOPY_RADIUS..=CANOPY_RADIUS {
        for iy in -CANOPY_RADIUS..=CANOPY_RADIUS {
            for iz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                let inside = ix * ix + iy * iy + iz * iz < 8 + rng.i32(0..=1);
                if inside && chunk.get(x + ix, top + iy, z + iz) == AIR {
                    chunk.set(x + ix, top + iy, z + iz, BlockType::LEAVES.id());
                }
            }
        }
    }
}
