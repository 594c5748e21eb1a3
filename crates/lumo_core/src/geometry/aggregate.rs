//! Composite of primitives and nested aggregates.

use lumo_math::{Aabb, Interval, Ray};

use super::{GeoHit, Intersectable};

/// A collection of intersectables queried as one unit.
///
/// Queries fan out to every child and concatenate the results. The union of
/// the children's bounds is cached so a ray that misses it skips the fan-out;
/// once an unbounded child (a plane or tube) is added the cache is `None` and
/// every query fans out.
pub struct Aggregate {
    children: Vec<Box<dyn Intersectable>>,
    bbox: Option<Aabb>,
}

impl Aggregate {
    /// Slack on the culling interval so hits exactly on a box face survive.
    const CULL_MARGIN: f64 = 1e-6;

    /// Create a new empty aggregate.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            bbox: Some(Aabb::EMPTY),
        }
    }

    /// Add a child.
    pub fn add(&mut self, child: impl Intersectable + 'static) {
        self.add_boxed(Box::new(child));
    }

    /// Add an already boxed child.
    pub fn add_boxed(&mut self, child: Box<dyn Intersectable>) {
        self.bbox = match (self.bbox, child.bounding_box()) {
            (Some(ours), Some(theirs)) => Some(Aabb::surrounding(&ours, &theirs)),
            _ => None,
        };
        self.children.push(child);
    }

    /// Builder form of [`Aggregate::add`].
    pub fn with(mut self, child: impl Intersectable + 'static) -> Self {
        self.add(child);
        self
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the aggregate is empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl Intersectable for Aggregate {
    fn find_hits(&self, ray: &Ray, max_distance: f64) -> Vec<GeoHit<'_>> {
        if let Some(bbox) = &self.bbox {
            let range = Interval::new(-Self::CULL_MARGIN, max_distance + Self::CULL_MARGIN);
            if !bbox.hit(ray, range) {
                return Vec::new();
            }
        }
        self.children
            .iter()
            .flat_map(|child| child.find_hits(ray, max_distance))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

impl<T: Intersectable + 'static> FromIterator<T> for Aggregate {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut aggregate = Aggregate::new();
        for child in iter {
            aggregate.add(child);
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Plane, Primitive, Sphere, Triangle};
    use lumo_math::{Point3, Vector3};

    fn first_set() -> Aggregate {
        Aggregate::new()
            .with(Primitive::new(
                Plane::new(Point3::new(1.0, 1.0, 0.0), Vector3::Z).unwrap(),
            ))
            .with(Primitive::new(
                Triangle::new(
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                    Point3::new(0.0, 0.0, 1.0),
                )
                .unwrap(),
            ))
            .with(Primitive::new(Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap()))
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate = Aggregate::new();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 5.0));
        assert!(aggregate.is_empty());
        assert!(aggregate.find_all_hits(&ray).is_empty());
    }

    #[test]
    fn test_aggregate_hit_counts() {
        let aggregate = first_set();
        assert_eq!(aggregate.len(), 3);

        // Misses everything
        let ray = Ray::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(aggregate.find_all_hits(&ray).len(), 0);

        // Plane only
        let ray = Ray::new(Point3::new(0.0, 5.0, -1.0), Vector3::Z);
        assert_eq!(aggregate.find_all_hits(&ray).len(), 1);

        // Plane and the sphere's far side
        let ray = Ray::new(Point3::new(1.0, 0.0, -1.0), Vector3::Z);
        assert_eq!(aggregate.find_all_hits(&ray).len(), 2);
    }

    #[test]
    fn test_aggregate_all_children_hit() {
        let aggregate = Aggregate::new()
            .with(Primitive::new(Sphere::new(Point3::new(4.0, 0.0, 0.0), 5.0).unwrap()))
            .with(Primitive::new(
                Triangle::new(
                    Point3::new(1.0, 4.0, 0.0),
                    Point3::new(1.0, 2.0, 0.0),
                    Point3::new(5.0, 2.0, 0.0),
                )
                .unwrap(),
            ))
            .with(Primitive::new(
                Plane::from_points(
                    Point3::new(1.0, 2.0, 0.0),
                    Point3::new(0.0, 7.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                )
                .unwrap(),
            ));

        let ray = Ray::new(Point3::new(2.0, 5.0, 4.0), Vector3::new(0.0, -2.0, -4.0));
        assert_eq!(aggregate.find_all_hits(&ray).len(), 4);
    }

    #[test]
    fn test_nested_aggregate_sums_children() {
        let ray = Ray::new(Point3::new(1.0, 0.0, -1.0), Vector3::Z);
        let flat = first_set();
        let expected = flat.find_all_hits(&ray).len();

        let nested = Aggregate::new()
            .with(Aggregate::new().with(Primitive::new(
                Plane::new(Point3::new(1.0, 1.0, 0.0), Vector3::Z).unwrap(),
            )))
            .with(
                Aggregate::new()
                    .with(Aggregate::new().with(Primitive::new(
                        Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap(),
                    )))
                    .with(Primitive::new(
                        Triangle::new(
                            Point3::new(1.0, 0.0, 0.0),
                            Point3::new(0.0, 1.0, 0.0),
                            Point3::new(0.0, 0.0, 1.0),
                        )
                        .unwrap(),
                    )),
            );

        assert_eq!(nested.find_all_hits(&ray).len(), expected);
    }

    #[test]
    fn test_aggregate_bounds() {
        let bounded: Aggregate = [
            Primitive::new(Sphere::new(Point3::ZERO, 1.0).unwrap()),
            Primitive::new(Sphere::new(Point3::new(5.0, 0.0, 0.0), 1.0).unwrap()),
        ]
        .into_iter()
        .collect();
        let bbox = bounded.bounding_box().unwrap();
        assert_eq!(bbox.x, Interval::new(-1.0, 6.0));

        let unbounded = bounded.with(Primitive::new(
            Plane::new(Point3::ZERO, Vector3::Y).unwrap(),
        ));
        assert!(unbounded.bounding_box().is_none());
    }

    #[test]
    fn test_aggregate_culling_keeps_results() {
        let aggregate = Aggregate::new()
            .with(Primitive::new(Sphere::new(Point3::ZERO, 1.0).unwrap()));

        // Beside the box
        let ray = Ray::new(Point3::new(3.0, 0.0, -5.0), Vector3::Z);
        assert!(aggregate.find_all_hits(&ray).is_empty());

        // From inside the box
        let ray = Ray::new(Point3::ZERO, Vector3::X);
        assert_eq!(aggregate.find_all_hits(&ray).len(), 1);

        // Ending exactly on the near surface
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::Z);
        assert_eq!(aggregate.find_hits(&ray, 4.0).len(), 1);
    }
}
