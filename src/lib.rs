#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Glescraft
//!
//! A bounded, chunked voxel world with lazy procedural generation, neighbour-aware face
//! culling, greedy mesh merging and an LRU-managed pool of vertex buffers.
//!
//! The crate owns no window and no GPU context. A host implements
//! [`RenderHost`](engine_state::rendering::RenderHost) (buffer allocation, upload and
//! draw calls) and, for block picking,
//! [`DepthReadback`](engine_state::rendering::DepthReadback); the world tells it what
//! to draw each frame.
//!
//! ## Key Modules
//!
//! * `config` - Serializable world and terrain settings
//! * `engine_state` - The world, meshing, buffer slots, camera and interaction
//! * `error` - Configuration errors
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::{Matrix4, SquareMatrix};
//! use glescraft::{HeadlessHost, World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig {
//!     seed: Some(42),
//!     size: [3, 1, 3],
//!     ..WorldConfig::default()
//! })
//! .unwrap();
//! let mut host = HeadlessHost::new();
//! while !world.is_fully_initialized() {
//!     world.render(&mut host, &Matrix4::identity());
//! }
//! ```

use log::info;
use web_time::{Duration, Instant};

use crate::engine_state::camera_state::Camera;

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::{TerrainConfig, WorldConfig};
pub use engine_state::{
    rendering::{headless::HeadlessHost, BufferHandle, DepthReadback, RenderHost, Vertex},
    voxels::world::{FrameStats, World},
    EngineState,
};
pub use error::{ConfigError, ConfigResult};

/// Viewport used by the headless runner.
const HEADLESS_VIEWPORT: (u32, u32) = (1024, 768);

/// Sets up logging for the current target.
///
/// Native builds log to stdout through `env_logger`, filtered by `RUST_LOG`. Web builds
/// log to the browser console and route panics there too. Calling this more than once
/// is harmless.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_family = "wasm")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if console_log::init_with_level(log::Level::Info).is_err() {
                return;
            }
        } else {
            let mut log_builder = env_logger::Builder::new();
            if log_builder
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG")
                .try_init()
                .is_err()
            {
                return;
            }
        }
    }

    info!("Logger initialized");
}

/// Totals of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub chunks_initialized: usize,
    /// Chunks drawn in the final frame
    pub chunks_drawn: usize,
    /// Vertices drawn in the final frame
    pub vertices_drawn: u64,
    /// Buffers the host allocated
    pub buffers: usize,
    pub elapsed: Duration,
}

/// Renders frames into a [`HeadlessHost`] until every chunk is initialized, then draws
/// one last frame with the whole world. The camera watches from the overview pose.
///
/// # Arguments
/// * `config` - World settings
///
/// # Returns
/// Run totals, or the configuration error that prevented creating the world.
pub fn run_headless(config: WorldConfig) -> ConfigResult<RunSummary> {
    config.validate()?;
    let frame_limit = config
        .chunk_count()
        .div_ceil(config.max_chunks_initialized_per_frame) as u64
        + 1;
    let (width, height) = HEADLESS_VIEWPORT;
    let mut engine = EngineState::new(config, width, height)?;
    engine.camera = Camera::overview();
    let mut host = HeadlessHost::new();

    let started = Instant::now();
    let mut last = FrameStats::default();
    while engine.frames() < frame_limit {
        let fully_initialized = engine.world.is_fully_initialized();
        host.begin_frame();
        last = engine.frame(&mut host);
        if fully_initialized {
            break;
        }
    }

    let summary = RunSummary {
        frames: engine.frames(),
        chunks_initialized: engine.world.initialized_count(),
        chunks_drawn: last.chunks_drawn,
        vertices_drawn: last.vertices_drawn,
        buffers: host.buffer_count(),
        elapsed: started.elapsed(),
    };
    info!(
        "Rendered {} frames in {:?}: {} of {} chunks initialized, {} chunks and {} vertices in the last frame, {} buffers",
        summary.frames,
        summary.elapsed,
        summary.chunks_initialized,
        engine.world.chunk_count(),
        summary.chunks_drawn,
        summary.vertices_drawn,
        summary.buffers
    );
    Ok(summary)
}

/// Entry point of the `glescraft` binary.
///
/// Takes an optional JSON configuration path as the first argument.
#[cfg(not(target_family = "wasm"))]
pub fn run() -> ConfigResult<RunSummary> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            WorldConfig::load(&path)?
        }
        None => WorldConfig::default(),
    };
    run_headless(config)
}
