//! # Interaction Module
//!
//! Block building and removal driven by what the camera is looking at.
//!
//! Each frame the host supplies the depth under the centre pixel and
//! [`picking::pick`] turns it into a [`Target`]. Mouse input then acts on that target:
//! the primary button places the current build type against the picked face, the
//! secondary button removes the picked block, and the wheel cycles the build type.

use log::info;

use crate::engine_state::voxels::{
    block::{block_type::BlockType, BlockTypeSize, AIR},
    world::World,
};

pub mod picking;

pub use picking::{pick, Target};

/// Number of distinct block ids the build type cycles through.
const BUILD_TYPES: BlockTypeSize = 16;

/// Current build type and cursor target.
#[derive(Debug, Clone)]
pub struct Interaction {
    build_type: BlockTypeSize,
    target: Option<Target>,
}

impl Interaction {
    pub fn new() -> Self {
        Interaction {
            build_type: BlockType::DIRT.id(),
            target: None,
        }
    }

    pub fn build_type(&self) -> BlockTypeSize {
        self.build_type
    }

    /// The block face under the cursor, as of the last frame.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }

    /// Cycles the build type: the wheel moving up selects the previous id, down the next.
    ///
    /// # Returns
    /// The new build type.
    pub fn scroll(&mut self, up: bool) -> BlockTypeSize {
        let next = if up {
            self.build_type.wrapping_sub(1)
        } else {
            self.build_type.wrapping_add(1)
        };
        self.build_type = next % BUILD_TYPES;

        info!(
            "Building blocks of type {} ({})",
            self.build_type,
            BlockType::get_block_type_from_int(self.build_type).name()
        );
        self.build_type
    }

    /// Places the build type in the cell in front of the targeted face.
    ///
    /// # Returns
    /// The cell written to, or `None` without a target.
    pub fn primary(&self, world: &mut World) -> Option<[i32; 3]> {
        let target = self.target?;
        let [x, y, z] = target.placement();
        info!(
            "Placing {} at {}, {}, {} (face {} of {:?})",
            BlockType::get_block_type_from_int(self.build_type).name(),
            x,
            y,
            z,
            target.face,
            target.block
        );
        world.set(x, y, z, self.build_type);
        Some([x, y, z])
    }

    /// Removes the targeted block.
    ///
    /// # Returns
    /// The cell cleared, or `None` without a target.
    pub fn secondary(&self, world: &mut World) -> Option<[i32; 3]> {
        let target = self.target?;
        let [x, y, z] = target.block;
        info!("Removing block at {}, {}, {}", x, y, z);
        world.set(x, y, z, AIR);
        Some(target.block)
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}
