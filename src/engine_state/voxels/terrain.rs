//! # Terrain Module
//!
//! Turns world coordinates into terrain: a column height from 2D octave noise, a
//! material band from an independent 3D noise sample, and the randomness used to plant
//! trees.
//!
//! ## Band Rule
//!
//! With `n` the column noise and `r` the material noise of a block below the surface:
//!
//! * `n + 5r < 4` - sand
//! * `n + 5r < 8` - dirt, with grass on the top layer of columns above sea level
//! * `r < 1.25` - stone
//! * otherwise - ore
//!
//! Everything at or above the column height is water below sea level and air above it.

use cgmath::Point3;
use noise::NoiseFn;

use super::block::block_type::BlockType;
use super::noise::{FractalNoise2, FractalNoise3};
use crate::config::TerrainConfig;

/// Terrain shape of one world column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Raw column noise, also used by the band rule.
    pub noise: f32,
    /// First world Y coordinate above the ground.
    pub height: i32,
}

/// Seeded terrain sampler shared by every chunk of a world.
#[derive(Debug, Clone)]
pub struct Terrain {
    seed: i32,
    sea_level: i32,
    config: TerrainConfig,
    height_noise: FractalNoise2,
    material_noise: FractalNoise3,
}

impl Terrain {
    pub fn new(seed: i32, sea_level: i32, config: TerrainConfig) -> Self {
        Terrain {
            seed,
            sea_level,
            height_noise: FractalNoise2 {
                seed,
                octaves: config.height_octaves,
                persistence: config.height_persistence,
                absolute: false,
            },
            material_noise: FractalNoise3 {
                seed: seed.wrapping_neg(),
                octaves: config.material_octaves,
                persistence: config.material_persistence,
                absolute: true,
            },
            config,
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Samples the column at world coordinates `(wx, wz)`.
    pub fn column(&self, wx: i32, wz: i32) -> Column {
        let scale = self.config.height_scale;
        let noise = self
            .height_noise
            .get([wx as f64 / scale, wz as f64 / scale]) as f32;
        Column {
            noise,
            height: (noise * self.config.height_amplitude) as i32,
        }
    }

    /// Material noise at a world block position.
    pub fn material_sample(&self, wx: i32, wy: i32, wz: i32) -> f32 {
        let scale = self.config.material_scale;
        self.material_noise
            .get([wx as f64 / scale, wy as f64 / scale, wz as f64 / scale]) as f32
    }

    /// The block a generated world holds at `wy` in `column`.
    ///
    /// # Returns
    /// `None` above the ground and above sea level, where trees may grow and the
    /// column ends.
    pub fn block_at(&self, column: Column, wx: i32, wy: i32, wz: i32) -> Option<BlockType> {
        if wy < column.height {
            return Some(self.ground_block(column, wx, wy, wz));
        }
        if wy < self.sea_level {
            return Some(BlockType::WATER);
        }
        None
    }

    /// Applies the band rule to a block below the column height.
    pub fn ground_block(&self, column: Column, wx: i32, wy: i32, wz: i32) -> BlockType {
        let r = self.material_sample(wx, wy, wz);
        let band = column.noise + r * self.config.material_weight;

        if band < self.config.sand_threshold {
            BlockType::SAND
        } else if band < self.config.dirt_threshold {
            if column.height < self.sea_level || wy < column.height - 1 {
                BlockType::DIRT
            } else {
                BlockType::GRASS
            }
        } else if r < self.config.stone_threshold {
            BlockType::STONE
        } else {
            BlockType::ORE
        }
    }

    /// Random stream for the trees of the chunk at `position`.
    ///
    /// Seeded from the world seed and the chunk coordinates only, so the same world
    /// always grows the same trees.
    pub fn chunk_rng(&self, position: Point3<i32>) -> fastrand::Rng {
        let mut hash = self.seed as u32 as u64;
        for coordinate in [position.x, position.y, position.z] {
            hash = hash.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ coordinate as u32 as u64;
        }
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        fastrand::Rng::with_seed(hash)
    }

    /// Whether a tree grows on a grass block.
    pub fn roll_tree(&self, rng: &mut fastrand::Rng) -> bool {
        self.config.tree_chance > 0 && rng.u32(0..self.config.tree_chance) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain() -> Terrain {
        Terrain::new(42, 4, TerrainConfig::default())
    }

    #[test]
    fn column_height_truncates_scaled_noise() {
        let terrain = terrain();
        for wx in -40..40 {
            let column = terrain.column(wx, 3 * wx);
            assert_eq!(column.height, (column.noise * 2.0) as i32);
        }
    }

    #[test]
    fn block_at_fills_water_up_to_sea_level() {
        let terrain = terrain();
        let column = Column {
            noise: 0.5,
            height: 1,
        };
        assert_eq!(terrain.block_at(column, 0, 2, 0), Some(BlockType::WATER));
        assert_eq!(terrain.block_at(column, 0, 3, 0), Some(BlockType::WATER));
        assert_eq!(terrain.block_at(column, 0, 4, 0), None);
        assert!(terrain.block_at(column, 0, 0, 0).is_some());
    }

    #[test]
    fn grass_only_tops_columns_above_sea_level() {
        let terrain = terrain();
        let mut seen_grass = false;
        for wx in -64..64 {
            for wz in -64..64 {
                let column = terrain.column(wx, wz);
                for wy in (column.height - 3)..column.height {
                    if terrain.ground_block(column, wx, wy, wz) == BlockType::GRASS {
                        seen_grass = true;
                        assert!(column.height >= terrain.sea_level());
                        assert_eq!(wy, column.height - 1);
                    }
                }
            }
        }
        assert!(seen_grass);
    }

    #[test]
    fn chunk_rng_is_reproducible() {
        let terrain = terrain();
        let a: Vec<u32> = {
            let mut rng = terrain.chunk_rng(Point3::new(1, -1, 2));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        let b: Vec<u32> = {
            let mut rng = terrain.chunk_rng(Point3::new(1, -1, 2));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        let c: Vec<u32> = {
            let mut rng = terrain.chunk_rng(Point3::new(2, -1, 1));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
