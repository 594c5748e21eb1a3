use crate::{Point3, Vector3};

/// A half-line with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so the ray parameter `t`
/// of any point equals its distance from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Origin offset used by [`Ray::offset`] to escape the surface a ray
    /// starts on.
    pub const DELTA: f64 = 0.1;

    /// Create a new ray. `direction` is normalized and must not be zero.
    ///
    /// A zero direction panics in debug builds and yields a NaN ray in
    /// release builds. Use [`Ray::try_new`] when the direction is not known
    /// to be non-zero.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        debug_assert!(
            direction.length_squared() > 0.0,
            "ray direction must not be the zero vector"
        );
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray, or `None` if `direction` is zero or not finite.
    pub fn try_new(origin: Point3, direction: Vector3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is pushed [`Ray::DELTA`] along `normal`, toward the side
    /// of the surface `direction` points into, so the ray does not report
    /// the surface it starts on.
    pub fn offset(point: Point3, direction: Vector3, normal: Vector3) -> Self {
        let delta = if normal.dot(direction) < 0.0 {
            -Self::DELTA
        } else {
            Self::DELTA
        };
        Self::new(point + normal * delta, direction)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Select the item whose point lies closest to the ray origin.
    ///
    /// Compares squared distances; on a tie the first item wins.
    pub fn closest_by<T>(
        &self,
        items: impl IntoIterator<Item = T>,
        point_of: impl Fn(&T) -> Point3,
    ) -> Option<T> {
        let mut closest: Option<(f64, T)> = None;
        for item in items {
            let distance = self.origin.distance_squared(point_of(&item));
            let is_closer = closest.as_ref().map_or(true, |(best, _)| distance < *best);
            if is_closer {
                closest = Some((distance, item));
            }
        }
        closest.map(|(_, item)| item)
    }

    /// Closest point to the ray origin, or `None` for an empty slice.
    pub fn find_closest_point(&self, points: &[Point3]) -> Option<Point3> {
        self.closest_by(points.iter().copied(), |p| *p)
    }
}
