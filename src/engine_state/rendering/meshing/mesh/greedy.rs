use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{ChunkRef, CHUNK_DIMENSIONS},
};

use super::{face::FACE_TEMPLATES, mesh::MeshScratch};

/// Summary of one mesh build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Vertices written to the scratch buffer
    pub vertex_count: u32,
    /// Faces that were folded into the preceding quad instead of getting their own
    pub merged_faces: u32,
}

/// Yields `0..len`, or the same range from the top down.
fn sweep(len: usize, descending: bool) -> impl Iterator<Item = usize> {
    (0..len).map(move |i| if descending { len - 1 - i } else { i })
}

/// Builds the mesh of `chunk` into `scratch`, replacing its previous contents.
///
/// Each of the six sides is swept in its template's order. A visible face is emitted as
/// two triangles, unless the face emitted immediately before it belongs to the previous
/// block along the inner axis and has the same block id; in that case the previous quad
/// is stretched to cover it. Nothing is merged across the start of an inner row.
///
/// # Arguments
/// * `chunk` - The chunk to mesh; faces on its border consult the neighbouring chunks
/// * `scratch` - Buffer that receives the vertices
///
/// # Returns
/// Vertex and merge counts of the new mesh.
pub fn build_chunk_mesh(chunk: ChunkRef, scratch: &mut MeshScratch) -> MeshStats {
    scratch.clear();
    let mut merged_faces = 0;

    // Whether the previous cell visited emitted a face, carried across rows and sides.
    let mut visible = false;

    for template in FACE_TEMPLATES.iter() {
        let [outer, middle, inner] = template.sweep;
        let normal = template.side.offset();

        for a in sweep(CHUNK_DIMENSIONS[outer], template.descending[0]) {
            for b in sweep(CHUNK_DIMENSIONS[middle], template.descending[1]) {
                for c in sweep(CHUNK_DIMENSIONS[inner], template.descending[2]) {
                    let mut position = [0usize; 3];
                    position[outer] = a;
                    position[middle] = b;
                    position[inner] = c;
                    let [x, y, z] = position.map(|p| p as i32);

                    if chunk.is_blocked(x, y, z, x + normal[0], y + normal[1], z + normal[2]) {
                        visible = false;
                        continue;
                    }

                    let block = chunk.get(x, y, z);
                    let base = position.map(|p| p as u8);

                    let mut previous = [x, y, z];
                    previous[inner] -= 1;
                    if visible && c != 0 && chunk.get(previous[0], previous[1], previous[2]) == block {
                        scratch.extend_last_quad(template, base);
                        merged_faces += 1;
                    } else {
                        let materials = BlockType::get_block_type_from_int(block).face_materials();
                        scratch.push_quad(template, base, template.material(materials));
                    }
                    visible = true;
                }
            }
        }
    }

    MeshStats {
        vertex_count: scratch.len() as u32,
        merged_faces,
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::{
        rendering::{meshing::mesh::MAX_CHUNK_VERTICES, Vertex, HORIZONTAL_FACE_FLAG},
        voxels::chunk::{Chunk, ChunkMut, CX, CY, CZ},
    };

    const STONE: u8 = BlockType::STONE as u8;

    fn single_chunk() -> Vec<Chunk> {
        vec![Chunk::new(Point3::new(0, 0, 0))]
    }

    fn mesh(chunks: &[Chunk]) -> (MeshStats, Vec<Vertex>) {
        let mut scratch = MeshScratch::new();
        let stats = build_chunk_mesh(ChunkRef::new(chunks, 0), &mut scratch);
        (stats, scratch.vertices().to_vec())
    }

    #[test]
    fn empty_chunk_has_no_vertices() {
        let (stats, vertices) = mesh(&single_chunk());
        assert_eq!(stats.vertex_count, 0);
        assert!(vertices.is_empty());
    }

    #[test]
    fn lone_block_emits_six_quads() {
        let mut chunks = single_chunk();
        ChunkMut::new(&mut chunks, 0).set(3, 4, 5, STONE);

        let (stats, vertices) = mesh(&chunks);
        assert_eq!(stats.vertex_count, 36);
        assert_eq!(stats.merged_faces, 0);

        let left: Vec<[u8; 3]> = vertices[..6].iter().map(|v| v.position()).collect();
        assert_eq!(
            left,
            vec![[3, 4, 5], [3, 4, 6], [3, 5, 5], [3, 5, 5], [3, 4, 6], [3, 5, 6]]
        );
    }

    #[test]
    fn runs_along_z_collapse_to_one_quad_per_side() {
        for length in [1, 4, CZ] {
            let mut chunks = single_chunk();
            {
                let mut chunk = ChunkMut::new(&mut chunks, 0);
                for z in 0..length as i32 {
                    chunk.set(5, 5, z, STONE);
                }
            }

            let (stats, vertices) = mesh(&chunks);
            assert_eq!(stats.vertex_count, 36, "run of {length}");
            assert_eq!(stats.merged_faces as usize, 4 * (length - 1));

            let left: Vec<[u8; 3]> = vertices[..6].iter().map(|v| v.position()).collect();
            let end = length as u8;
            assert_eq!(
                left,
                vec![[5, 5, 0], [5, 5, end], [5, 6, 0], [5, 6, 0], [5, 5, end], [5, 6, end]]
            );
        }
    }

    #[test]
    fn runs_along_y_merge_only_on_z_sides() {
        let length = 6;
        let mut chunks = single_chunk();
        {
            let mut chunk = ChunkMut::new(&mut chunks, 0);
            for y in 0..length {
                chunk.set(2, y, 2, STONE);
            }
        }

        let (stats, _) = mesh(&chunks);
        let quads = 2 * length as u32 + 4;
        assert_eq!(stats.vertex_count, quads * 6);
    }

    #[test]
    fn different_blocks_do_not_merge() {
        let mut chunks = single_chunk();
        {
            let mut chunk = ChunkMut::new(&mut chunks, 0);
            chunk.set(1, 1, 0, STONE);
            chunk.set(1, 1, 1, BlockType::BRICK as u8);
        }

        let (stats, _) = mesh(&chunks);
        assert_eq!(stats.merged_faces, 0);
        assert_eq!(stats.vertex_count, 10 * 6);
    }

    #[test]
    fn faces_do_not_merge_across_rows() {
        let mut chunks = single_chunk();
        {
            let mut chunk = ChunkMut::new(&mut chunks, 0);
            chunk.set(5, 0, CZ as i32 - 1, STONE);
            chunk.set(5, 1, 0, STONE);
        }

        let (stats, _) = mesh(&chunks);
        assert_eq!(stats.merged_faces, 0);
        assert_eq!(stats.vertex_count, 72);
    }

    #[test]
    fn horizontal_faces_carry_the_flag_and_cap_materials() {
        let mut chunks = single_chunk();
        ChunkMut::new(&mut chunks, 0).set(0, 0, 0, BlockType::GRASS as u8);

        let (_, vertices) = mesh(&chunks);
        let sides: Vec<u8> = vertices.chunks(6).map(|quad| quad[0].material).collect();
        assert_eq!(
            sides,
            vec![
                BlockType::TOPSOIL as u8,
                BlockType::TOPSOIL as u8,
                BlockType::DIRT as u8 | HORIZONTAL_FACE_FLAG,
                BlockType::GRASS as u8 | HORIZONTAL_FACE_FLAG,
                BlockType::TOPSOIL as u8,
                BlockType::TOPSOIL as u8,
            ]
        );
    }

    #[test]
    fn buried_block_is_hidden() {
        let mut chunks = single_chunk();
        {
            let mut chunk = ChunkMut::new(&mut chunks, 0);
            for x in 0..3 {
                for y in 0..3 {
                    for z in 0..3 {
                        chunk.set(x + 4, y + 4, z + 4, STONE);
                    }
                }
            }
        }

        let (stats, vertices) = mesh(&chunks);
        // Each side of the cube is three merged strips.
        assert_eq!(stats.vertex_count, 6 * 3 * 6);
        assert!(vertices
            .iter()
            .all(|v| v.position().iter().any(|&c| c == 4 || c == 7)));
    }

    #[test]
    fn worst_case_fills_the_scratch_exactly() {
        let mut chunks = single_chunk();
        {
            let mut chunk = ChunkMut::new(&mut chunks, 0);
            for x in 0..CX as i32 {
                for y in 0..CY as i32 {
                    for z in 0..CZ as i32 {
                        let block = if (x + y + z) % 2 == 0 {
                            BlockType::LEAVES
                        } else {
                            BlockType::GLASS
                        };
                        chunk.set(x, y, z, block as u8);
                    }
                }
            }
        }

        let (stats, _) = mesh(&chunks);
        assert_eq!(stats.vertex_count as usize, MAX_CHUNK_VERTICES);
    }
}
