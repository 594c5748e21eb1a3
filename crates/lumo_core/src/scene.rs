//! The scene a renderer reads from.
//!
//! A scene is assembled with by-value builders and is immutable afterwards,
//! so a single `&Scene` can be shared by every render worker.

use lumo_math::Color;

use crate::geometry::{Aggregate, Intersectable};
use crate::light::{AmbientLight, LightSource};

/// Geometry, lights and background of a render.
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Aggregate,
    lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient_light: AmbientLight::NONE,
            geometries: Aggregate::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Replace the scene geometry.
    pub fn with_geometries(mut self, geometries: Aggregate) -> Self {
        self.geometries = geometries;
        self
    }

    /// Add one primitive or aggregate to the scene geometry.
    pub fn with_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient_light
    }

    pub fn geometries(&self) -> &Aggregate {
        &self.geometries
    }

    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Primitive, Sphere};
    use crate::light::PointLight;
    use lumo_math::{DVec3, Point3};

    #[test]
    fn test_scene_defaults() {
        let scene = Scene::new("empty");
        assert_eq!(scene.name(), "empty");
        assert_eq!(scene.background(), Color::ZERO);
        assert_eq!(scene.ambient_light().intensity(), Color::ZERO);
        assert!(scene.geometries().is_empty());
        assert!(scene.lights().is_empty());
    }

    #[test]
    fn test_scene_builder() {
        let scene = Scene::new("builder")
            .with_background(Color::new(0.1, 0.2, 0.3))
            .with_ambient_light(AmbientLight::new(Color::ONE, DVec3::splat(0.1)))
            .with_geometry(Primitive::new(Sphere::new(Point3::ZERO, 1.0).unwrap()))
            .with_light(PointLight::new(Color::ONE, Point3::new(0.0, 5.0, 0.0)));

        assert_eq!(scene.background(), Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.ambient_light().intensity(), Color::splat(0.1));
        assert_eq!(scene.geometries().len(), 1);
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn test_scene_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scene>();
    }
}
