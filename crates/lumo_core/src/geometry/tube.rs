use lumo_math::{align_zero, is_zero, Point3, Ray, Vector3};

use super::{in_range, Surface};
use crate::error::{GeometryError, GeometryResult};

/// An infinite cylinder of `radius` around an axis ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis_origin: Point3, axis_direction: Vector3, radius: f64) -> GeometryResult<Self> {
        let axis = Ray::try_new(axis_origin, axis_direction)
            .ok_or(GeometryError::ZeroVector("tube axis"))?;
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    #[inline]
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance of the projection of `point` along the axis.
    pub(crate) fn axial_parameter(&self, point: Point3) -> f64 {
        align_zero(self.axis.direction().dot(point - self.axis.origin()))
    }
}

impl Surface for Tube {
    fn normal_at(&self, point: Point3) -> Vector3 {
        let t = self.axial_parameter(point);
        let on_axis = self.axis.at(t);
        (point - on_axis).normalize()
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        let va = self.axis.direction();
        let dir = ray.direction();

        // Components perpendicular to the axis
        let dir_perp = dir - va * dir.dot(va);
        let a = dir_perp.length_squared();
        // Parallel to the axis
        if is_zero(a) {
            return Vec::new();
        }

        let delta = ray.origin() - self.axis.origin();
        let delta_perp = delta - va * delta.dot(va);
        let b = 2.0 * dir_perp.dot(delta_perp);
        let c = delta_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrt_d = discriminant.sqrt();
        let t1 = align_zero((-b - sqrt_d) / (2.0 * a));
        let t2 = align_zero((-b + sqrt_d) / (2.0 * a));

        [t1, t2]
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .map(|t| ray.at(t))
            .collect()
    }
}
