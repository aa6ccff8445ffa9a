//! # World Configuration
//!
//! Serializable settings for world size, generation and rendering budgets. Every field
//! has a default, so an empty JSON object describes the stock 32×2×32 world.
//!
//! ```
//! use glescraft::config::WorldConfig;
//!
//! let config = WorldConfig::from_json_str(r#"{ "seed": 42, "size": [4, 1, 4] }"#).unwrap();
//! assert_eq!(config.chunk_count(), 16);
//! assert_eq!(config.sea_level, 4);
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::engine_state::voxels::chunk::CHUNK_DIMENSIONS;
use crate::error::{ConfigError, ConfigResult};

/// Parameters of the procedural terrain.
///
/// Heights come from 2-D fractal noise sampled at `height_scale` blocks per lattice
/// cell. Underground material comes from the column noise plus `material_weight` times
/// a 3-D absolute fractal sample, compared against the band thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub height_scale: f64,
    pub height_octaves: u32,
    pub height_persistence: f32,
    pub height_amplitude: f32,
    pub material_scale: f64,
    pub material_octaves: u32,
    pub material_persistence: f32,
    pub material_weight: f32,
    /// Band values below this are sand
    pub sand_threshold: f32,
    /// Band values below this (and not sand) are dirt or grass
    pub dirt_threshold: f32,
    /// Material samples below this are stone, the rest ore
    pub stone_threshold: f32,
    /// One in this many grass columns grows a tree; 0 disables trees
    pub tree_chance: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            height_scale: 256.0,
            height_octaves: 4,
            height_persistence: 2.38,
            height_amplitude: 2.0,
            material_scale: 16.0,
            material_octaves: 2,
            material_persistence: 1.0,
            material_weight: 5.0,
            sand_threshold: 4.0,
            dirt_threshold: 8.0,
            stone_threshold: 1.25,
            tree_chance: 256,
        }
    }
}

/// Settings of a [`World`](crate::engine_state::voxels::world::World).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Generation seed; derived from the wall clock when absent
    pub seed: Option<i32>,
    /// Number of chunks along X, Y and Z
    pub size: [usize; 3],
    /// World height below which empty space above the terrain fills with water
    pub sea_level: i32,
    /// Maximum number of chunks holding a vertex buffer; defaults to every chunk
    pub slot_capacity: Option<usize>,
    /// How many chunks `World::render` may initialize per call
    pub max_chunks_initialized_per_frame: usize,
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            size: [32, 2, 32],
            sea_level: 4,
            slot_capacity: None,
            max_chunks_initialized_per_frame: 1,
            terrain: TerrainConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// The configuration, or the I/O, parse or validation error that stopped it.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects configurations that cannot describe a usable world.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.size.contains(&0) {
            return Err(ConfigError::Invalid(format!(
                "world size {:?} has a zero dimension",
                self.size
            )));
        }
        for (axis, (&chunks, &blocks)) in self.size.iter().zip(&CHUNK_DIMENSIONS).enumerate() {
            let fits = chunks
                .checked_mul(blocks)
                .is_some_and(|span| span <= i32::MAX as usize);
            if !fits {
                return Err(ConfigError::Invalid(format!(
                    "world size {} along axis {} exceeds the block coordinate range",
                    chunks, axis
                )));
            }
        }
        if self.checked_chunk_count().is_none() {
            return Err(ConfigError::Invalid(format!(
                "world size {:?} has too many chunks",
                self.size
            )));
        }
        if self.slot_capacity == Some(0) {
            return Err(ConfigError::Invalid("slot capacity must be at least 1".into()));
        }
        if self.max_chunks_initialized_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "at least one chunk must be initialized per frame".into(),
            ));
        }
        if self.terrain.height_scale <= 0.0 || self.terrain.material_scale <= 0.0 {
            return Err(ConfigError::Invalid("noise scales must be positive".into()));
        }
        Ok(())
    }

    /// Total number of chunks in the world, saturating at `usize::MAX`.
    pub fn chunk_count(&self) -> usize {
        self.checked_chunk_count().unwrap_or(usize::MAX)
    }

    fn checked_chunk_count(&self) -> Option<usize> {
        self.size
            .iter()
            .try_fold(1usize, |count, &axis| count.checked_mul(axis))
    }

    /// Slot pool capacity: the configured value capped at the chunk count, or the chunk
    /// count itself.
    pub fn effective_slot_capacity(&self) -> usize {
        let chunks = self.chunk_count();
        self.slot_capacity.map_or(chunks, |slots| slots.min(chunks))
    }

    /// The configured seed, or one taken from the current time.
    pub fn resolve_seed(&self) -> i32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs() as i32)
                .unwrap_or_default()
        })
    }
}
