//! # Engine State Module
//!
//! The core engine module that ties the voxel world to a rendering host.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera pose and projection
//! * `interaction` - Block picking, building and removal
//! * `rendering` - The host interface, vertex format, meshing and buffer slots
//! * `voxels` - Blocks, chunks, terrain generation and the world
//!
//! ## Frame Flow
//!
//! A host calls [`EngineState::frame`] once per displayed frame. The world draws its
//! initialized chunks and initializes more of them, then the depth under the centre
//! pixel is read back to update the block the cursor points at.

use log::debug;

use crate::config::WorldConfig;
use crate::error::ConfigResult;

pub mod camera_state;
pub mod interaction;
pub mod rendering;
pub mod voxels;

use camera_state::{Camera, Projection};
use interaction::{pick, Interaction};
use rendering::{DepthReadback, RenderHost};
use voxels::world::{FrameStats, World};

/// The main state container for the voxel engine
///
/// Owns the world, the camera and the interaction state. Everything runs on the thread
/// that calls [`EngineState::frame`].
pub struct EngineState {
    pub world: World,
    pub interaction: Interaction,
    pub camera: Camera,
    pub projection: Projection,
    frames: u64,
}

impl EngineState {
    /// Creates the engine for a viewport of `width` by `height` pixels.
    ///
    /// # Arguments
    /// * `config` - World settings
    /// * `width`, `height` - Viewport size in pixels
    ///
    /// # Returns
    /// The engine, or the configuration error that prevented creating the world.
    pub fn new(config: WorldConfig, width: u32, height: u32) -> ConfigResult<Self> {
        Ok(EngineState {
            world: World::new(config)?,
            interaction: Interaction::new(),
            camera: Camera::start(),
            projection: Projection::standard(width, height),
            frames: 0,
        })
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Renders one frame and refreshes the cursor target.
    ///
    /// # Arguments
    /// * `host` - Host receiving buffer uploads and draw calls, and supplying depth
    ///
    /// # Returns
    /// What the world did this frame.
    pub fn frame<H: RenderHost + DepthReadback + ?Sized>(&mut self, host: &mut H) -> FrameStats {
        let view = self.camera.view_matrix();
        let projection = self.projection.matrix();
        let stats = self.world.render(host, &(projection * view));

        let depth = host.read_depth(self.projection.width() / 2, self.projection.height() / 2);
        let target = depth.and_then(|depth| {
            pick(
                &view,
                &projection,
                self.projection.viewport(),
                depth,
                self.camera.look_direction(),
            )
        });
        if target != self.interaction.target() {
            debug!("Cursor target is now {:?}", target.map(|t| (t.block, t.face)));
        }
        self.interaction.set_target(target);

        self.frames += 1;
        stats
    }

    /// Places the current build type against the targeted face.
    pub fn build(&mut self) -> Option<[i32; 3]> {
        self.interaction.primary(&mut self.world)
    }

    /// Removes the targeted block.
    pub fn remove(&mut self) -> Option<[i32; 3]> {
        self.interaction.secondary(&mut self.world)
    }
}
