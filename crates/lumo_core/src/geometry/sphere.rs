use lumo_math::{align_zero, Aabb, Point3, Ray, Vector3};

use super::{in_range, Surface};
use crate::error::{GeometryError, GeometryResult};

/// A sphere defined by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Point3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Sphere {
    fn normal_at(&self, point: Point3) -> Vector3 {
        (point - self.center).normalize()
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        // From the center every direction exits at exactly one radius
        if ray.origin() == self.center {
            return if in_range(self.radius, max_distance) {
                vec![ray.at(self.radius)]
            } else {
                Vec::new()
            };
        }

        let u = self.center - ray.origin();
        let tm = align_zero(ray.direction().dot(u));
        let d_squared = align_zero(u.length_squared() - tm * tm);
        let r_squared = self.radius * self.radius;

        // Miss or tangent
        if align_zero(d_squared - r_squared) >= 0.0 {
            return Vec::new();
        }

        let th = (r_squared - d_squared).sqrt();
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);

        [t1, t2]
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .map(|t| ray.at(t))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let rvec = Vector3::splat(self.radius);
        Some(Aabb::from_points(self.center - rvec, self.center + rvec))
    }
}
