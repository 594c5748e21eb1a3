use lumo_math::{align_zero, is_zero, Point3, Ray, Vector3};

use super::{in_range, Surface};
use crate::error::{GeometryError, GeometryResult};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vector3,
}

impl Plane {
    /// Plane through `point` perpendicular to `normal`. The normal is normalized.
    pub fn new(point: Point3, normal: Vector3) -> GeometryResult<Self> {
        let normal = normal
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("plane normal"))?;
        Ok(Self { point, normal })
    }

    /// Plane through three points, normal `(b - a) x (c - a)`.
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> GeometryResult<Self> {
        if a == b || b == c || a == c {
            return Err(GeometryError::DuplicatePoints);
        }
        let cross = (b - a).cross(c - a);
        if is_zero(cross.length()) {
            return Err(GeometryError::CollinearPoints);
        }
        Ok(Self {
            point: a,
            normal: cross.normalize(),
        })
    }

    #[inline]
    pub fn point(&self) -> Point3 {
        self.point
    }

    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }
}

impl Surface for Plane {
    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.normal
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        let nv = self.normal.dot(ray.direction());
        // Parallel to the plane
        if is_zero(nv) {
            return Vec::new();
        }

        let to_plane = self.point - ray.origin();
        if to_plane == Vector3::ZERO {
            return Vec::new();
        }

        // Origin lies in the plane
        let numerator = self.normal.dot(to_plane);
        if is_zero(numerator) {
            return Vec::new();
        }

        let t = align_zero(numerator / nv);
        if in_range(t, max_distance) {
            vec![ray.at(t)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_plane_from_points_unit_normal() {
        let plane = Plane::from_points(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 4.0),
        )
        .unwrap();

        let n = plane.normal_at(Point3::new(1.0, 0.0, 0.0));
        assert!((n.length() - 1.0).abs() < 1e-12);
        // Normal is perpendicular to both edges
        assert!(n.dot(Vector3::new(-1.0, 1.0, 0.0)).abs() < 1e-12);
        assert!(n.dot(Vector3::new(-1.0, 0.0, 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_plane_from_points_orientation() {
        let plane = Plane::from_points(Point3::ZERO, Point3::X, Point3::Y).unwrap();
        assert_eq!(plane.normal(), Vector3::Z);
    }

    #[test]
    fn test_plane_rejects_degenerate_points() {
        let a = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(
            Plane::from_points(a, a, Point3::ZERO),
            Err(GeometryError::DuplicatePoints)
        );
        assert_eq!(
            Plane::from_points(Point3::ZERO, Point3::X, Point3::new(2.0, 0.0, 0.0)),
            Err(GeometryError::CollinearPoints)
        );
        assert_eq!(
            Plane::new(Point3::ZERO, Vector3::ZERO),
            Err(GeometryError::ZeroVector("plane normal"))
        );
    }

    #[test]
    fn test_plane_intersect_crossing_ray() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::Z).unwrap();

        // Ray crossing the plane at an angle
        let ray = Ray::new(Point3::ZERO, Vector3::new(1.0, 0.0, 1.0));
        let hits = plane.intersect(&ray, f64::INFINITY);
        assert_eq!(hits.len(), 1);
        assert!(approx_eq(hits[0], Point3::new(1.0, 0.0, 1.0)));

        // Orthogonal ray
        let ray = Ray::new(Point3::new(2.0, 3.0, -1.0), Vector3::Z);
        let hits = plane.intersect(&ray, f64::INFINITY);
        assert_eq!(hits, vec![Point3::new(2.0, 3.0, 1.0)]);
    }

    #[test]
    fn test_plane_intersect_misses() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::Z).unwrap();

        // Ray pointing away from the plane
        let ray = Ray::new(Point3::ZERO, -Vector3::Z);
        assert!(plane.intersect(&ray, f64::INFINITY).is_empty());

        // Ray parallel to the plane
        let ray = Ray::new(Point3::ZERO, Vector3::X);
        assert!(plane.intersect(&ray, f64::INFINITY).is_empty());

        // Ray lying in the plane
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(1.0, 1.0, 0.0));
        assert!(plane.intersect(&ray, f64::INFINITY).is_empty());

        // Ray starting on the plane
        let ray = Ray::new(Point3::new(5.0, 0.0, 1.0), Vector3::new(1.0, 0.0, 1.0));
        assert!(plane.intersect(&ray, f64::INFINITY).is_empty());

        // Ray starting at the reference point
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::Z);
        assert!(plane.intersect(&ray, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_plane_intersect_max_distance() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 2.0), Vector3::Z).unwrap();
        let ray = Ray::new(Point3::ZERO, Vector3::Z);

        assert_eq!(plane.intersect(&ray, 2.0).len(), 1);
        assert!(plane.intersect(&ray, 1.999).is_empty());
    }
}
