use lumo_math::{align_zero, is_zero, Aabb, Point3, Ray, Vector3};

use super::{Plane, Surface};
use crate::error::{GeometryError, GeometryResult};

/// A planar convex polygon with vertices given in boundary order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Build a polygon, validating that the vertices are coplanar, ordered
    /// and form a convex outline.
    pub fn new(vertices: Vec<Point3>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if vertices.len() > 3 {
            check_outline(&vertices, plane.normal())?;
        }
        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

/// Every edge turns the same way around `normal` and every vertex lies in
/// the plane of the first.
fn check_outline(vertices: &[Point3], normal: Vector3) -> GeometryResult<()> {
    let n = vertices.len();
    let edge = |from: usize, to: usize| -> GeometryResult<Vector3> {
        let e = vertices[to] - vertices[from];
        if e == Vector3::ZERO {
            Err(GeometryError::DuplicatePoints)
        } else {
            Ok(e)
        }
    };
    let turn = |e1: Vector3, e2: Vector3| -> GeometryResult<bool> {
        let cross = e1.cross(e2);
        if is_zero(cross.length()) {
            Err(GeometryError::CollinearPoints)
        } else {
            Ok(cross.dot(normal) > 0.0)
        }
    };

    let mut edge1 = edge(n - 2, n - 1)?;
    let mut edge2 = edge(n - 1, 0)?;
    let positive = turn(edge1, edge2)?;

    for i in 1..n {
        if !is_zero((vertices[i] - vertices[0]).dot(normal)) {
            return Err(GeometryError::NonCoplanarVertices);
        }
        edge1 = edge2;
        edge2 = edge(i - 1, i)?;
        if turn(edge1, edge2)? != positive {
            return Err(GeometryError::NonConvex);
        }
    }
    Ok(())
}

impl Surface for Polygon {
    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.plane.normal()
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        let hits = self.plane.intersect(ray, max_distance);
        if hits.is_empty() {
            return hits;
        }

        // The plane hit is inside iff the ray passes each edge on the same side
        let origin = ray.origin();
        let dir = ray.direction();
        let n = self.vertices.len();
        let mut sign = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i] - origin;
            let v2 = self.vertices[(i + 1) % n] - origin;
            let s = align_zero(dir.dot(v1.cross(v2)));
            if s == 0.0 || s * sign < 0.0 {
                return Vec::new();
            }
            sign = s;
        }
        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::enclosing(&self.vertices))
    }
}

/// A triangle: a polygon of exactly three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> GeometryResult<Self> {
        Polygon::new(vec![a, b, c]).map(Triangle)
    }

    pub fn vertices(&self) -> &[Point3] {
        self.0.vertices()
    }
}

impl Surface for Triangle {
    fn normal_at(&self, point: Point3) -> Vector3 {
        self.0.normal_at(point)
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point3> {
        self.0.intersect(ray, max_distance)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.0.bounding_box()
    }
}
