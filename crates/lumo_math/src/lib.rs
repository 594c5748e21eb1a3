// Re-export glam for convenience
pub use glam::*;

// Lumo math types
mod aabb;
mod interval;
mod ray;
mod transform;
mod util;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::rotation_degrees;
pub use util::{align_zero, is_zero, EPSILON};

/// A position in world space.
pub type Point3 = DVec3;

/// A direction or offset in world space.
pub type Vector3 = DVec3;

/// Linear RGB color. Channels are not clamped until the image is quantized.
pub type Color = DVec3;
