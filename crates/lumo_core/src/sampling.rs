//! Random sampling helpers shared by soft shadows and glossy transport.
//!
//! All functions take an explicit `&mut dyn RngCore` so callers control the
//! seed.

use lumo_math::{DVec2, Vector3};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform sample inside the unit disk.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec2 {
    let r = gen_f64(rng).sqrt();
    let theta = 2.0 * PI * gen_f64(rng);
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Two unit vectors completing `n` (assumed unit) to an orthonormal frame.
pub fn orthonormal_basis(n: Vector3) -> (Vector3, Vector3) {
    // Cross with the axis least aligned with n
    let abs = n.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::X
    } else if abs.y <= abs.z {
        Vector3::Y
    } else {
        Vector3::Z
    };
    let u = n.cross(axis).normalize();
    let v = n.cross(u);
    (u, v)
}

/// Cosine-weighted direction on the hemisphere around `axis` (assumed unit).
///
/// Malley's method: a uniform disk sample lifted onto the hemisphere.
pub fn cosine_hemisphere(axis: Vector3, rng: &mut dyn RngCore) -> Vector3 {
    let (u, v) = orthonormal_basis(axis);
    let d = random_in_unit_disk(rng);
    let z = (1.0 - d.length_squared()).max(0.0).sqrt();
    u * d.x + v * d.y + axis * z
}
