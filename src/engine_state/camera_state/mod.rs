//! # Camera State Management
//!
//! A small first-person camera for hosts driving the world. The world itself only
//! needs a view-projection matrix; picking additionally needs the view and projection
//! separately and the look direction.

pub mod camera;

pub use camera::{Camera, Projection};
