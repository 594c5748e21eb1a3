//! Lumo Renderer - CPU Whitted-style ray tracing
//!
//! Traces rays from a pinhole camera through a read-only [`Scene`],
//! shading hits with Phong lighting, recursive reflection and refraction,
//! and optional soft shadows, glossy bounces and anti-aliasing.
//!
//! Rendering is driven by a [`Renderer`], which hands pixels out to a pool
//! of workers and writes the finished image to an [`ImageSink`].

mod camera;
mod config;
mod error;
mod image;
mod ray_tracer;
mod renderer;
mod sampler;
mod scheduler;

pub use camera::Camera;
pub use config::{RenderConfig, SamplingMode, ShadingConfig};
pub use error::{RenderError, RenderResult};
pub use image::{color_to_rgba, ImageBuffer, ImageSink};
pub use ray_tracer::{
    is_negligible, Integrator, RayTracer, INITIAL_K, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K,
};
pub use renderer::{pixel_rng, resolve_workers, RenderStats, Renderer};
pub use sampler::Sampler;
pub use scheduler::{Pixel, PixelScheduler};

/// Re-export the scene description and math types
pub use lumo_core::{
    Aggregate, AmbientLight, Cylinder, DirectionalLight, GeoHit, GeometryError, GeometryResult,
    Intersectable, LightSource, Material, Plane, PointLight, Polygon, Primitive, Scene, Shape,
    Sphere, SpotLight, Surface, Triangle, Tube,
};
pub use lumo_math::{Color, Point3, Ray, Vector3};
