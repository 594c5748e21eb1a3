//! Rotation helpers for camera orientation.
//!
//! Angles are taken in degrees and applied about the world axes in X, Y, Z order.

use glam::DMat3;

/// Rotation matrix for the given per-axis angles in degrees.
///
/// Equivalent to rotating about X first, then Y, then Z.
pub fn rotation_degrees(x: f64, y: f64, z: f64) -> DMat3 {
    DMat3::from_rotation_z(z.to_radians())
        * DMat3::from_rotation_y(y.to_radians())
        * DMat3::from_rotation_x(x.to_radians())
}
