//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and preset poses
//! - Projection matrix handling
//!
//! ## Key Components
//! - `Camera`: The camera's position and orientation in world units
//! - `Projection`: Perspective projection settings and the viewport size

use std::f32::consts::PI;

use cgmath::*;

/// Pitch limit, just short of straight up or down.
pub const PITCH_LIMIT: f32 = PI * 0.49;

/// Represents a first-person camera in 3D space.
///
/// Yaw 0 looks along +Z. Positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians, within ±[`PITCH_LIMIT`]
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw
    /// * `pitch` - Initial pitch; clamped to ±[`PITCH_LIMIT`]
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// The starting pose: slightly above the origin, looking down a little.
    pub fn start() -> Self {
        Self::new(Point3::new(0.0, 4.0, 0.0), Rad(0.0), Rad(-0.5))
    }

    /// Standing at the origin, looking level along +Z.
    pub fn home() -> Self {
        Self::new(Point3::new(0.0, 2.0, 0.0), Rad(0.0), Rad(0.0))
    }

    /// High above the origin, looking almost straight down.
    pub fn overview() -> Self {
        Self::new(Point3::new(0.0, 80.0, 0.0), Rad(0.0), Rad(-PITCH_LIMIT))
    }

    /// Unit vector the camera looks along.
    pub fn look_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(yaw_sin * pitch_cos, pitch_sin, yaw_cos * pitch_cos)
    }

    /// Horizontal direction of forward movement.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_sin, 0.0, yaw_cos)
    }

    /// Horizontal direction of rightward movement.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_cos, 0.0, yaw_sin)
    }

    /// Calculates the view matrix for this camera.
    ///
    /// # Returns
    /// A 4x4 view matrix that transforms world coordinates to camera space
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.look_direction(), Vector3::unit_y())
    }

    fn clamp_pitch(&mut self) {
        self.pitch.0 = self.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::start()
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
/// It manages the viewport size, field of view, and near/far clipping planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// The usual 45 degree projection with a 0.01..100 depth range.
    pub fn standard(width: u32, height: u32) -> Self {
        Self::new(width, height, Deg(45.0), 0.01, 100.0)
    }

    /// Updates the viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Viewport rectangle as `[x, y, width, height]`.
    pub fn viewport(&self) -> [f32; 4] {
        [0.0, 0.0, self.width as f32, self.height as f32]
    }

    /// Calculates the projection matrix, mapping depth to -1..1.
    pub fn matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect(), self.znear, self.zfar)
    }
}
