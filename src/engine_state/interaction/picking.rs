//! Screen-centre block picking.
//!
//! The host reads the depth buffer under the centre pixel; the depth is unprojected
//! back into world space and scaled to block units. The block is whichever cell
//! contains that point, and the face is guessed from which coordinate lies closest to a
//! whole number. This guess is only reliable when the depth sample is precise; it is
//! the same cheap heuristic the cursor box has always used.

use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

use crate::engine_state::voxels::world::BLOCKS_PER_UNIT;

/// A block face under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// World block coordinates
    pub block: [i32; 3],
    /// 0, 1, 2 for the +X, +Y, +Z faces and 3, 4, 5 for -X, -Y, -Z
    pub face: u8,
    /// Picked point in block units
    pub point: Point3<f32>,
}

impl Target {
    /// Classifies a point in block units seen along `look`.
    pub fn from_point(point: Point3<f32>, look: Vector3<f32>) -> Self {
        let block = [point.x, point.y, point.z].map(|c| {
            let cell = c as i32;
            if c < 0.0 {
                cell - 1
            } else {
                cell
            }
        });

        let [dx, dy, dz] = [point.x, point.y, point.z].map(nearest_integer_distance);
        let axis = if dx < dy {
            if dx < dz {
                0
            } else {
                2
            }
        } else if dy < dz {
            1
        } else {
            2
        };

        let face = if look[axis] > 0.0 { axis + 3 } else { axis };
        Target {
            block,
            face: face as u8,
            point,
        }
    }

    /// The cell a new block is placed in: the neighbour across the picked face.
    pub fn placement(&self) -> [i32; 3] {
        let [x, y, z] = self.block;
        match self.face {
            0 => [x + 1, y, z],
            1 => [x, y + 1, z],
            2 => [x, y, z + 1],
            3 => [x - 1, y, z],
            4 => [x, y - 1, z],
            5 => [x, y, z - 1],
            _ => self.block,
        }
    }
}

/// Absolute distance from `value` to the closest integer.
pub fn nearest_integer_distance(value: f32) -> f32 {
    let fraction = value - value.floor();
    if fraction > 0.5 {
        1.0 - fraction
    } else {
        fraction
    }
}

/// Maps window coordinates and a depth in 0..1 back to world space.
///
/// # Arguments
/// * `window` - Pixel x, pixel y and depth
/// * `view` - View matrix used for the frame
/// * `projection` - Projection matrix used for the frame
/// * `viewport` - `[x, y, width, height]` of the viewport
///
/// # Returns
/// The world point, or `None` if the matrices are singular.
pub fn unproject(
    window: Vector3<f32>,
    view: &Matrix4<f32>,
    projection: &Matrix4<f32>,
    viewport: [f32; 4],
) -> Option<Point3<f32>> {
    let inverse = (projection * view).invert()?;
    let ndc = Vector4::new(
        (window.x - viewport[0]) / viewport[2] * 2.0 - 1.0,
        (window.y - viewport[1]) / viewport[3] * 2.0 - 1.0,
        window.z * 2.0 - 1.0,
        1.0,
    );
    let object = inverse * ndc;
    if object.w == 0.0 {
        return None;
    }
    Some(Point3::from_homogeneous(object))
}

/// Finds the block face under the centre of the viewport.
///
/// # Arguments
/// * `view`, `projection` - Matrices used to draw the frame
/// * `viewport` - `[x, y, width, height]` of the viewport
/// * `depth` - Depth buffer value at the centre pixel
/// * `look` - Camera look direction
///
/// # Returns
/// The target, or `None` when the centre pixel shows only sky.
pub fn pick(
    view: &Matrix4<f32>,
    projection: &Matrix4<f32>,
    viewport: [f32; 4],
    depth: f32,
    look: Vector3<f32>,
) -> Option<Target> {
    if !(0.0..1.0).contains(&depth) {
        return None;
    }

    let centre = Vector3::new(
        viewport[0] + (viewport[2] / 2.0).floor(),
        viewport[1] + (viewport[3] / 2.0).floor(),
        depth,
    );
    let point = unproject(centre, view, projection, viewport)?;
    Some(Target::from_point(
        Point3::from_vec(point.to_vec() * BLOCKS_PER_UNIT),
        look,
    ))
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Rad};

    use super::*;
    use crate::engine_state::camera_state::{Camera, Projection};

    #[test]
    fn nearest_integer_distance_is_symmetric() {
        assert_eq!(nearest_integer_distance(2.25), 0.25);
        assert_eq!(nearest_integer_distance(2.75), 0.25);
        assert_eq!(nearest_integer_distance(-0.25), 0.25);
        assert_eq!(nearest_integer_distance(3.0), 0.0);
    }

    #[test]
    fn negative_coordinates_round_down() {
        let target = Target::from_point(Point3::new(-0.5, 1.5, -2.5), Vector3::unit_x());
        assert_eq!(target.block, [-1, 1, -3]);
    }

    #[test]
    fn looking_down_z_picks_the_near_face() {
        let target = Target::from_point(Point3::new(2.5, 3.5, 6.98), -Vector3::unit_z());
        assert_eq!(target.block, [2, 3, 6]);
        assert_eq!(target.face, 2);
        assert_eq!(target.placement(), [2, 3, 7]);
    }

    #[test]
    fn positive_look_direction_flips_the_face() {
        let target = Target::from_point(Point3::new(4.01, 0.5, 0.5), Vector3::unit_x());
        assert_eq!(target.face, 3);
        assert_eq!(target.placement(), [3, 0, 0]);

        let target = Target::from_point(Point3::new(0.5, 8.02, 0.5), -Vector3::unit_y());
        assert_eq!(target.face, 1);
        assert_eq!(target.placement(), [0, 9, 0]);
    }

    #[test]
    fn unproject_inverts_the_projection() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Rad(0.3), Rad(-0.2));
        let projection = Projection::standard(800, 600);
        let view = camera.view_matrix();
        let world = Point3::new(1.5, 1.8, 6.0);

        let clip = projection.matrix() * view * world.to_homogeneous();
        let ndc = clip.truncate() / clip.w;
        let window = Vector3::new(
            (ndc.x + 1.0) / 2.0 * 800.0,
            (ndc.y + 1.0) / 2.0 * 600.0,
            (ndc.z + 1.0) / 2.0,
        );

        let back = unproject(window, &view, &projection.matrix(), projection.viewport()).unwrap();
        assert!((back - world).magnitude() < 1e-2);
    }

    #[test]
    fn pick_scales_to_blocks() {
        let identity = Matrix4::identity();
        let target = pick(&identity, &identity, [0.0, 0.0, 2.0, 2.0], 0.75, Vector3::unit_z()).unwrap();
        assert_eq!(target.block, [0, 0, 4]);
        assert_eq!(target.face, 5);
        assert_eq!(target.placement(), [0, 0, 3]);
    }

    #[test]
    fn sky_has_no_target() {
        let identity = Matrix4::identity();
        assert_eq!(pick(&identity, &identity, [0.0, 0.0, 2.0, 2.0], 1.0, Vector3::unit_z()), None);
    }
}
