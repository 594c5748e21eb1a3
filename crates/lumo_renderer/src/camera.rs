//! Pinhole camera with an explicit view plane.

use lumo_core::{GeometryError, GeometryResult};
use lumo_math::{is_zero, rotation_degrees, Point3, Ray, Vector3};

use crate::error::{RenderError, RenderResult};

/// Camera for generating rays into the scene.
///
/// The view plane sits `distance` along `v_to` and is `width` x `height`
/// world units; pixel rows run along `-v_up` and columns along `v_right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    v_to: Vector3,
    v_up: Vector3,
    v_right: Vector3,

    // View plane
    distance: f64,
    width: f64,
    height: f64,
}

impl Camera {
    /// Create a camera at `position` looking along `v_to` with `v_up` up.
    ///
    /// The two vectors must be non-zero and orthogonal.
    pub fn new(position: Point3, v_to: Vector3, v_up: Vector3) -> GeometryResult<Self> {
        let v_to = v_to
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("camera forward"))?;
        let v_up = v_up
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("camera up"))?;
        if !is_zero(v_to.dot(v_up)) {
            return Err(GeometryError::NonOrthogonal);
        }
        Ok(Self {
            position,
            v_to,
            v_up,
            v_right: v_to.cross(v_up).normalize(),
            distance: 1.0,
            width: 1.0,
            height: 1.0,
        })
    }

    /// Set the distance from the camera to the view plane.
    pub fn with_view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the view plane size in world units.
    pub fn with_view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Translate the camera.
    pub fn move_by(mut self, offset: Vector3) -> Self {
        self.position += offset;
        self
    }

    /// Rotate the camera frame about the world X, Y and Z axes, in degrees.
    pub fn rotate(mut self, x: f64, y: f64, z: f64) -> Self {
        let m = rotation_degrees(x, y, z);
        self.v_to = (m * self.v_to).normalize();
        self.v_up = (m * self.v_up).normalize();
        self.v_right = self.v_to.cross(self.v_up).normalize();
        self
    }

    /// Check the view plane can produce rays.
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.distance > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "view plane distance must be positive, got {}",
                self.distance
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "view plane size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    #[inline]
    pub fn v_to(&self) -> Vector3 {
        self.v_to
    }

    #[inline]
    pub fn v_up(&self) -> Vector3 {
        self.v_up
    }

    #[inline]
    pub fn v_right(&self) -> Vector3 {
        self.v_right
    }

    /// Ray through the center of pixel (column `j`, row `i`) of an `nx` x `ny` grid.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> Ray {
        self.construct_ray_through(nx, ny, j, i, 0.0, 0.0)
    }

    /// Ray through pixel (`j`, `i`) offset from its center by (`dx`, `dy`)
    /// pixel widths, `dx` to the right and `dy` downward.
    pub fn construct_ray_through(&self, nx: u32, ny: u32, j: u32, i: u32, dx: f64, dy: f64) -> Ray {
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;

        let xj = (j as f64 - (nx as f64 - 1.0) / 2.0 + dx) * rx;
        let yi = -(i as f64 - (ny as f64 - 1.0) / 2.0 + dy) * ry;

        let mut p_ij = self.position + self.v_to * self.distance;
        if !is_zero(xj) {
            p_ij += self.v_right * xj;
        }
        if !is_zero(yi) {
            p_ij += self.v_up * yi;
        }
        Ray::new(self.position, p_ij - self.position)
    }

    /// `n * n` rays through the cell centers of pixel (`j`, `i`), row by row,
    /// followed by the pixel center ray.
    pub fn construct_anti_aliasing_rays(&self, nx: u32, ny: u32, j: u32, i: u32, n: u32) -> Vec<Ray> {
        let mut rays = Vec::with_capacity((n * n) as usize + 1);
        for row in 0..n {
            for col in 0..n {
                rays.push(self.construct_ray_through(
                    nx,
                    ny,
                    j,
                    i,
                    grid_offset(col as f64, n),
                    grid_offset(row as f64, n),
                ));
            }
        }
        rays.push(self.construct_ray(nx, ny, j, i));
        rays
    }
}

/// Offset in pixel widths of the center of grid cell `index` in an
/// `n`-cell row. Fractional indices land between cell centers.
pub(crate) fn grid_offset(index: f64, n: u32) -> f64 {
    (index + 0.5) / n as f64 - 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::{Aggregate, Intersectable, Plane, Primitive, Sphere, Triangle};

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    fn view_camera(position: Point3) -> Camera {
        Camera::new(position, -Vector3::Z, -Vector3::Y)
            .unwrap()
            .with_view_plane_distance(1.0)
            .with_view_plane_size(3.0, 3.0)
    }

    fn count_hits(camera: &Camera, geometry: impl Intersectable + 'static) -> usize {
        let scene = Aggregate::new().with(geometry);
        let mut count = 0;
        for i in 0..3 {
            for j in 0..3 {
                count += scene.find_all_hits(&camera.construct_ray(3, 3, j, i)).len();
            }
        }
        count
    }

    #[test]
    fn test_camera_rejects_bad_frame() {
        assert_eq!(
            Camera::new(Point3::ZERO, -Vector3::Z, Vector3::new(0.0, 1.0, 1.0)),
            Err(GeometryError::NonOrthogonal)
        );
        assert_eq!(
            Camera::new(Point3::ZERO, Vector3::ZERO, Vector3::Y),
            Err(GeometryError::ZeroVector("camera forward"))
        );
    }

    #[test]
    fn test_camera_right_vector() {
        let camera = Camera::new(Point3::ZERO, -Vector3::Z, Vector3::Y).unwrap();
        assert_eq!(camera.v_right(), Vector3::X);
    }

    #[test]
    fn test_construct_ray() {
        let camera = Camera::new(Point3::ZERO, Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.0, -1.0, 0.0))
            .unwrap()
            .with_view_plane_distance(10.0)
            .with_view_plane_size(6.0, 6.0);

        // 4x4 corner pixel
        let ray = camera.construct_ray(4, 4, 0, 0);
        assert!(approx_eq(ray.direction(), Vector3::new(2.25, -2.25, -10.0).normalize()));

        // 3x3 center pixel
        let ray = camera.construct_ray(3, 3, 1, 1);
        assert_eq!(ray.direction(), Vector3::new(0.0, 0.0, -1.0));

        // 3x3 edge pixel
        let ray = camera.construct_ray(3, 3, 1, 0);
        assert!(approx_eq(ray.direction(), Vector3::new(0.0, -2.0, -10.0).normalize()));
        let ray = camera.construct_ray(3, 3, 0, 1);
        assert!(approx_eq(ray.direction(), Vector3::new(2.0, 0.0, -10.0).normalize()));
    }

    #[test]
    fn test_anti_aliasing_rays() {
        let camera = view_camera(Point3::ZERO);
        let rays = camera.construct_anti_aliasing_rays(3, 3, 1, 1, 2);
        assert_eq!(rays.len(), 5);
        assert_eq!(rays[4], camera.construct_ray(3, 3, 1, 1));

        // Cell centers sit a quarter pixel from the pixel center
        let expected = camera.construct_ray_through(3, 3, 1, 1, -0.25, -0.25);
        assert_eq!(rays[0], expected);
        let expected = camera.construct_ray_through(3, 3, 1, 1, 0.25, 0.25);
        assert_eq!(rays[3], expected);
    }

    #[test]
    fn test_grid_offset() {
        assert_eq!(grid_offset(0.0, 1), 0.0);
        assert_eq!(grid_offset(0.0, 2), -0.25);
        assert_eq!(grid_offset(1.0, 2), 0.25);
        assert_eq!(grid_offset(1.5, 4), 0.0);
    }

    #[test]
    fn test_move_and_rotate() {
        let camera = Camera::new(Point3::ZERO, -Vector3::Z, Vector3::Y)
            .unwrap()
            .move_by(Vector3::new(1.0, 2.0, 3.0))
            .rotate(0.0, 90.0, 0.0);

        assert_eq!(camera.position(), Point3::new(1.0, 2.0, 3.0));
        assert!(approx_eq(camera.v_to(), -Vector3::X));
        assert!(approx_eq(camera.v_up(), Vector3::Y));
        assert!(approx_eq(camera.v_right(), -Vector3::Z));
    }

    #[test]
    fn test_validate_view_plane() {
        let camera = view_camera(Point3::ZERO);
        assert!(camera.validate().is_ok());
        assert!(camera.clone().with_view_plane_distance(0.0).validate().is_err());
        assert!(camera.with_view_plane_size(0.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_camera_sphere_integration() {
        let camera = view_camera(Point3::ZERO);
        let camera2 = view_camera(Point3::new(0.0, 0.0, 0.5));
        let sphere = |r: f64, c: Point3| Primitive::new(Sphere::new(c, r).unwrap());

        assert_eq!(count_hits(&camera, sphere(1.0, Point3::new(0.0, 0.0, -3.0))), 2);
        assert_eq!(count_hits(&camera2, sphere(2.5, Point3::new(0.0, 0.0, -2.5))), 18);
        assert_eq!(count_hits(&camera2, sphere(2.0, Point3::new(0.0, 0.0, -2.0))), 10);
        assert_eq!(count_hits(&camera2, sphere(4.0, Point3::new(0.0, 0.0, -1.0))), 9);
        assert_eq!(count_hits(&camera, sphere(0.5, Point3::new(0.0, 0.0, 1.0))), 0);
    }

    #[test]
    fn test_camera_plane_integration() {
        let camera = view_camera(Point3::ZERO);
        let plane = |n: Vector3| Primitive::new(Plane::new(Point3::new(0.0, 0.0, -5.0), n).unwrap());

        assert_eq!(count_hits(&camera, plane(Vector3::new(0.0, 0.0, 1.0))), 9);
        assert_eq!(count_hits(&camera, plane(Vector3::new(0.0, 1.0, 2.0))), 9);
        assert_eq!(count_hits(&camera, plane(Vector3::new(0.0, 1.0, 1.0))), 6);
    }

    #[test]
    fn test_camera_triangle_integration() {
        let camera = view_camera(Point3::ZERO);
        let triangle = |c: Point3| {
            Primitive::new(
                Triangle::new(Point3::new(1.0, 1.0, -2.0), Point3::new(-1.0, 1.0, -2.0), c).unwrap(),
            )
        };

        assert_eq!(count_hits(&camera, triangle(Point3::new(0.0, -1.0, -2.0))), 1);
        assert_eq!(count_hits(&camera, triangle(Point3::new(0.0, -20.0, -2.0))), 2);
    }
}
