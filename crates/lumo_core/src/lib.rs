//! Lumo Core - scene description for the ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: analytic primitives (`Plane`, `Sphere`, `Tube`,
//!   `Cylinder`, `Triangle`, `Polygon`) and the `Aggregate` composite
//! - **Materials**: Phong coefficients plus reflection, transparency
//!   and glossiness attenuation
//! - **Lights**: point, spot and directional sources plus ambient light
//! - **Scene**: the immutable container a renderer reads from
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::{Material, Primitive, Scene, Sphere, PointLight};
//!
//! let ball = Primitive::new(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0)?)
//!     .with_emission(Color::new(0.2, 0.0, 0.0))
//!     .with_material(Material::new().with_kd_scalar(0.5));
//! let scene = Scene::new("demo")
//!     .with_geometry(ball)
//!     .with_light(PointLight::new(Color::ONE, Point3::new(0.0, 5.0, 0.0)));
//! ```

pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod sampling;
pub mod scene;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    Aggregate, Cylinder, GeoHit, Intersectable, Plane, Polygon, Primitive, Shape, Sphere,
    Surface, Triangle, Tube,
};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use scene::Scene;
