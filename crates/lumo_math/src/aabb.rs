use crate::{Interval, Point3, Ray};

/// Axis-aligned bounding box used to cull aggregate queries.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Minimum extent along any axis, so flat shapes still have a volume.
    const MIN_EXTENT: f64 = 0.0001;

    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Smallest AABB enclosing every point, or [`Aabb::EMPTY`] for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut min = Point3::INFINITY;
        let mut max = Point3::NEG_INFINITY;
        let mut any = false;
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
            any = true;
        }
        if any {
            Self::from_points(min, max)
        } else {
            Self::EMPTY
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Test if a ray intersects this AABB within the given parameter interval.
    ///
    /// Slab method. A zero direction component yields infinite slab bounds,
    /// and the NaN produced when the origin lies on a slab face is ignored by
    /// `f64::max`/`f64::min`, so axis-parallel rays are handled.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin();
        let direction = r.direction();

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / direction[axis];
            let mut t0 = (slab.min - origin[axis]) * adinv;
            let mut t1 = (slab.max - origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max < ray_t.min {
                return false;
            }
        }

        true
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        if self.x.size() < Self::MIN_EXTENT {
            self.x = self.x.expand(Self::MIN_EXTENT);
        }
        if self.y.size() < Self::MIN_EXTENT {
            self.y = self.y.expand(Self::MIN_EXTENT);
        }
        if self.z.size() < Self::MIN_EXTENT {
            self.z = self.z.expand(Self::MIN_EXTENT);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
