use lumo_math::{align_zero, Aabb, Point3, Ray, Vector3};

use super::{Plane, Surface, Tube};
use crate::error::{GeometryError, GeometryResult};

/// A finite, capped cylinder: a [`Tube`] cut at `0` and `height` along its
/// axis and closed by two cap planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bottom: Plane,
    top: Plane,
}

impl Cylinder {
    /// At most this many hits are reported for a ray.
    const MAX_HITS: usize = 2;

    pub fn new(
        axis_origin: Point3,
        axis_direction: Vector3,
        radius: f64,
        height: f64,
    ) -> GeometryResult<Self> {
        let tube = Tube::new(axis_origin, axis_direction, radius)?;
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        let axis = tube.axis();
        let bottom = Plane::new(axis.origin(), axis.direction())?;
        let top = Plane::new(axis.at(height), axis.direction())?;
        Ok(Self {
            tube,
            height,
            bottom,
            top,
        })
    }

    #[inline]
    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    fn cap_hits<'a>(
        &'a self,
        ray: &'a Ray,
        max_distance: f64,
    ) -> impl Iterator<Item = Point3> + 'a {
        let r_squared = self.tube.radius() * self.tube.radius();
        [self.bottom, self.top].into_iter().flat_map(move |cap| {
            cap.intersect(ray, max_distance)
                .into_iter()
                .filter(move |p| align_zero(p.distance_squared(cap.point()) - r_squared) <= 0.0)
        })
    }
}

impl Surface for Cylinder {
    fn normal_at(&self, point: Point3) -> Vector3 {
        let axis = self.tube.axis().direction();
        let t = self.tube.axial_parameter(point);
        if t == 0.0 {
            -axis
        } else if align_zero(t - self.height) == 0.0 {
            axis
        } else {
            self.tube.normal_at(point)
        }
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        // Lateral hits strictly between the caps; rim points come from the caps
        let mut hits: Vec<Point3> = self
            .tube
            .intersect(ray, max_distance)
            .into_iter()
            .filter(|p| {
                let t = self.tube.axial_parameter(*p);
                t > 0.0 && align_zero(t - self.height) < 0.0
            })
            .chain(self.cap_hits(ray, max_distance))
            .collect();

        let origin = ray.origin();
        hits.sort_by(|a, b| {
            origin
                .distance_squared(*a)
                .total_cmp(&origin.distance_squared(*b))
        });
        hits.truncate(Self::MAX_HITS);
        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let axis = self.tube.axis();
        let rvec = Vector3::splat(self.tube.radius());
        let bottom = axis.origin();
        let top = axis.at(self.height);
        Some(Aabb::surrounding(
            &Aabb::from_points(bottom - rvec, bottom + rvec),
            &Aabb::from_points(top - rvec, top + rvec),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_math::Interval;

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    fn unit_cylinder() -> Cylinder {
        Cylinder::new(Point3::ZERO, Vector3::Z, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_cylinder_rejects_bad_height() {
        assert_eq!(
            Cylinder::new(Point3::ZERO, Vector3::Z, 1.0, 0.0),
            Err(GeometryError::NonPositiveHeight(0.0))
        );
        assert!(Cylinder::new(Point3::ZERO, Vector3::Z, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_cylinder_normals() {
        let cylinder = unit_cylinder();

        // Top cap
        assert_eq!(cylinder.normal_at(Point3::new(0.0, 0.5, 1.0)), Vector3::Z);
        // Bottom cap
        assert_eq!(cylinder.normal_at(Point3::new(0.0, 0.5, 0.0)), -Vector3::Z);
        // Lateral surface
        assert_eq!(cylinder.normal_at(Point3::new(0.0, 1.0, 0.5)), Vector3::Y);
        assert_eq!(cylinder.normal_at(Point3::new(0.0, 0.5, 0.5)), Vector3::Y);
    }

    #[test]
    fn test_cylinder_normal_near_rim() {
        let cylinder = unit_cylinder();

        let side = cylinder.normal_at(Point3::new(0.0, 1.0, 0.00001));
        let cap = cylinder.normal_at(Point3::new(0.0, 0.99999999, 0.0));
        assert_eq!(side, Vector3::Y);
        assert_eq!(cap, -Vector3::Z);
        assert_ne!(side, cap);
    }

    #[test]
    fn test_cylinder_side_hits_between_caps() {
        let ray = Ray::new(Point3::new(-3.0, 0.0, 0.5), Vector3::X);
        let hits = unit_cylinder().intersect(&ray, f64::INFINITY);

        assert_eq!(hits.len(), 2);
        assert!(approx_eq(hits[0], Point3::new(-1.0, 0.0, 0.5)));
        assert!(approx_eq(hits[1], Point3::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn test_cylinder_side_miss_outside_height() {
        let ray = Ray::new(Point3::new(-3.0, 0.0, 1.5), Vector3::X);
        assert!(unit_cylinder().intersect(&ray, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_cylinder_through_both_caps() {
        let ray = Ray::new(Point3::new(0.2, 0.3, -2.0), Vector3::Z);
        let hits = unit_cylinder().intersect(&ray, f64::INFINITY);

        assert_eq!(hits, vec![Point3::new(0.2, 0.3, 0.0), Point3::new(0.2, 0.3, 1.0)]);
    }

    #[test]
    fn test_cylinder_cap_and_side() {
        // Enters through the bottom cap, leaves through the side
        let ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vector3::new(1.0, 0.0, 2.0));
        let hits = unit_cylinder().intersect(&ray, f64::INFINITY);

        assert_eq!(hits.len(), 2);
        assert!(approx_eq(hits[0], Point3::new(0.5, 0.0, 0.0)));
        assert!(approx_eq(hits[1], Point3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_cylinder_from_inside() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.5), Vector3::Z);
        let hits = unit_cylinder().intersect(&ray, f64::INFINITY);
        assert_eq!(hits, vec![Point3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn test_cylinder_max_distance() {
        let ray = Ray::new(Point3::new(0.2, 0.3, -2.0), Vector3::Z);
        let hits = unit_cylinder().intersect(&ray, 2.5);
        assert_eq!(hits, vec![Point3::new(0.2, 0.3, 0.0)]);
    }

    #[test]
    fn test_cylinder_bounding_box() {
        let bbox = unit_cylinder().bounding_box().unwrap();
        assert_eq!(bbox.z, Interval::new(-1.0, 2.0));
        assert_eq!(bbox.x, Interval::new(-1.0, 1.0));
    }
}
