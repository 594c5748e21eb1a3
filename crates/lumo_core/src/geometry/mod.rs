//! Ray/surface intersection for analytic primitives.
//!
//! Every shape answers two questions through [`Surface`]: the outward
//! normal at a point on it, and the points where a ray meets it. Results
//! never include points at ray parameter `t <= 0` or farther than the
//! supplied maximum distance; rays lying in or starting on a surface
//! report no hit.

mod aggregate;
mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use aggregate::Aggregate;
pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::Tube;

use lumo_math::{align_zero, Aabb, Color, Point3, Ray, Vector3};

use crate::material::Material;

/// Geometric capability shared by all shapes.
pub trait Surface {
    /// Unit outward normal at a point assumed to lie on the surface.
    fn normal_at(&self, point: Point3) -> Vector3;

    /// Intersection points with `ray`, nearest first, no farther than
    /// `max_distance`.
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3>;

    /// Bounds of the surface, or `None` for unbounded shapes.
    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

/// True when a ray parameter is in front of the origin and within range.
#[inline]
pub(crate) fn in_range(t: f64, max_distance: f64) -> bool {
    t > 0.0 && align_zero(t - max_distance) <= 0.0
}

/// The closed set of primitive shapes.
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Tube(Tube),
    Cylinder(Cylinder),
    Triangle(Triangle),
    Polygon(Polygon),
}

impl Surface for Shape {
    fn normal_at(&self, point: Point3) -> Vector3 {
        match self {
            Shape::Plane(s) => s.normal_at(point),
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Tube(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
            Shape::Triangle(s) => s.normal_at(point),
            Shape::Polygon(s) => s.normal_at(point),
        }
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        match self {
            Shape::Plane(s) => s.intersect(ray, max_distance),
            Shape::Sphere(s) => s.intersect(ray, max_distance),
            Shape::Tube(s) => s.intersect(ray, max_distance),
            Shape::Cylinder(s) => s.intersect(ray, max_distance),
            Shape::Triangle(s) => s.intersect(ray, max_distance),
            Shape::Polygon(s) => s.intersect(ray, max_distance),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            Shape::Plane(s) => s.bounding_box(),
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Tube(s) => s.bounding_box(),
            Shape::Cylinder(s) => s.bounding_box(),
            Shape::Triangle(s) => s.bounding_box(),
            Shape::Polygon(s) => s.bounding_box(),
        }
    }
}

macro_rules! shape_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

shape_from!(Plane, Sphere, Tube, Cylinder, Triangle, Polygon);

/// A ray/surface intersection: the primitive that was hit and where.
#[derive(Debug, Clone, Copy)]
pub struct GeoHit<'a> {
    pub primitive: &'a Primitive,
    pub point: Point3,
}

/// Anything that can be queried for ray hits: a primitive or an aggregate.
pub trait Intersectable: Send + Sync {
    /// All hits along `ray` no farther than `max_distance`.
    fn find_hits(&self, ray: &Ray, max_distance: f64) -> Vec<GeoHit<'_>>;

    /// Bounds of everything reachable through this node, `None` if unbounded.
    fn bounding_box(&self) -> Option<Aabb>;

    /// All hits along `ray` at any distance.
    fn find_all_hits(&self, ray: &Ray) -> Vec<GeoHit<'_>> {
        self.find_hits(ray, f64::INFINITY)
    }
}

/// A shape with its material and self-emitted light.
///
/// Built by value and frozen once placed in an [`Aggregate`].
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Primitive {
    /// A black, non-emissive primitive.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            emission: Color::ZERO,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Surface normal of the underlying shape.
    pub fn normal_at(&self, point: Point3) -> Vector3 {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Primitive {
    fn find_hits(&self, ray: &Ray, max_distance: f64) -> Vec<GeoHit<'_>> {
        self.shape
            .intersect(ray, max_distance)
            .into_iter()
            .map(|point| GeoHit {
                primitive: self,
                point,
            })
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.shape.bounding_box()
    }
}
