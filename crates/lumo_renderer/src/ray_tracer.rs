//! Recursive Whitted-style shading.
//!
//! Implements:
//! - Phong local illumination with attenuation-based shadows
//! - Recursive reflection and straight-through refraction
//! - Energy cutoff on the accumulated attenuation `k`
//! - Optional soft shadows and glossy bounces

use lumo_core::sampling::cosine_hemisphere;
use lumo_core::{GeoHit, Intersectable, LightSource, Material, Scene};
use lumo_math::{align_zero, Color, Point3, Ray, Vector3};
use rand::RngCore;

use crate::config::ShadingConfig;
use crate::error::RenderResult;

/// Recursion starts at this level and stops at level 1.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Contributions whose attenuation falls below this on every channel are dropped.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

/// Attenuation of a primary ray.
pub const INITIAL_K: Color = Color::ONE;

/// True if every channel of `k` is below [`MIN_CALC_COLOR_K`].
#[inline]
pub fn is_negligible(k: Color) -> bool {
    k.x < MIN_CALC_COLOR_K && k.y < MIN_CALC_COLOR_K && k.z < MIN_CALC_COLOR_K
}

/// Turns rays into colors.
pub trait Integrator: Send + Sync {
    /// Color seen along `ray`.
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color;

    /// Check settings before the first ray is traced.
    fn validate(&self) -> RenderResult<()> {
        Ok(())
    }

    /// Uniform average of [`Integrator::trace_ray`] over `rays`.
    fn trace_rays(&self, rays: &[Ray], rng: &mut dyn RngCore) -> Color {
        if rays.is_empty() {
            return Color::ZERO;
        }
        let sum = rays
            .iter()
            .fold(Color::ZERO, |acc, ray| acc + self.trace_ray(ray, rng));
        sum / rays.len() as f64
    }
}

/// Whitted ray tracer over a borrowed scene.
pub struct RayTracer<'s> {
    scene: &'s Scene,
    shading: ShadingConfig,
}

impl<'s> RayTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            shading: ShadingConfig::default(),
        }
    }

    pub fn with_shading(mut self, shading: ShadingConfig) -> Self {
        self.shading = shading;
        self
    }

    pub fn shading(&self) -> &ShadingConfig {
        &self.shading
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    fn closest_hit(&self, ray: &Ray) -> Option<GeoHit<'s>> {
        let hits = self.scene.geometries().find_all_hits(ray);
        ray.closest_by(hits, |hit| hit.point)
    }

    /// Full color at a hit: recursive transport plus ambient light.
    pub fn color(&self, hit: &GeoHit<'_>, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.color_recursive(hit, ray, MAX_CALC_COLOR_LEVEL, INITIAL_K, rng)
            + self.scene.ambient_light().intensity()
    }

    /// Local effect at `hit`, plus reflection and refraction unless `level`
    /// has reached 1.
    pub fn color_recursive(
        &self,
        hit: &GeoHit<'_>,
        ray: &Ray,
        level: u32,
        k: Color,
        rng: &mut dyn RngCore,
    ) -> Color {
        let n = hit.primitive.normal_at(hit.point);
        let v = ray.direction();
        let nv = align_zero(n.dot(v));
        // Grazing view: only self-emission, no reflection or refraction
        if nv == 0.0 {
            return hit.primitive.emission();
        }

        let local = self.local_effect(hit, n, v, nv, k, rng);
        if level <= 1 {
            return local;
        }
        local + self.global_effects(hit, n, v, nv, level, k, rng)
    }

    fn local_effect(
        &self,
        hit: &GeoHit<'_>,
        n: Vector3,
        v: Vector3,
        nv: f64,
        k: Color,
        rng: &mut dyn RngCore,
    ) -> Color {
        let material = hit.primitive.material();
        let mut color = hit.primitive.emission();

        for light in self.scene.lights() {
            let Some(l) = light.incidence(hit.point) else {
                continue;
            };
            let nl = align_zero(n.dot(l));
            // Light and viewer on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }
            let ktr = self.transmittance(light.as_ref(), l, n, hit.point, rng);
            if is_negligible(ktr * k) {
                continue;
            }
            let il = light.intensity_at(hit.point) * ktr;
            color += il * (diffuse(material, nl) + specular(material, n, l, nl, v));
        }
        color
    }

    /// Fraction of a light's intensity reaching `point`, soft-shadow sampled
    /// when enabled.
    fn transmittance(
        &self,
        light: &dyn LightSource,
        l: Vector3,
        n: Vector3,
        point: Point3,
        rng: &mut dyn RngCore,
    ) -> Color {
        if !self.shading.soft_shadows {
            return self.transparency(light, l, n, point);
        }
        let incidences = light.sample_incidences(
            point,
            self.shading.soft_shadow_radius,
            self.shading.soft_shadow_rays,
            rng,
        );
        if incidences.is_empty() {
            return self.transparency(light, l, n, point);
        }
        let sum = incidences
            .iter()
            .fold(Color::ZERO, |acc, li| acc + self.transparency(light, *li, n, point));
        sum / incidences.len() as f64
    }

    /// Product of the transparency of everything between `point` and the
    /// light along incidence `l`.
    ///
    /// Returns (1, 1, 1) when nothing is in the way and zero as soon as the
    /// product becomes negligible.
    pub fn transparency(&self, light: &dyn LightSource, l: Vector3, n: Vector3, point: Point3) -> Color {
        let shadow_ray = Ray::offset(point, -l, n);
        let distance = light.distance(point);

        let mut ktr = Color::ONE;
        for hit in self.scene.geometries().find_hits(&shadow_ray, distance) {
            ktr *= hit.primitive.material().kt();
            if is_negligible(ktr) {
                return Color::ZERO;
            }
        }
        ktr
    }

    #[allow(clippy::too_many_arguments)]
    fn global_effects(
        &self,
        hit: &GeoHit<'_>,
        n: Vector3,
        v: Vector3,
        nv: f64,
        level: u32,
        k: Color,
        rng: &mut dyn RngCore,
    ) -> Color {
        let material = hit.primitive.material();
        let mut color = Color::ZERO;

        let kr = material.kr();
        let kkr = kr * k;
        if !is_negligible(kkr) {
            let reflected = v - n * (2.0 * nv);
            let rays = self.bounce_rays(hit.point, reflected, n, material, rng);
            color += self.global_effect(&rays, level, kr, kkr, rng);
        }

        let kt = material.kt();
        let kkt = kt * k;
        if !is_negligible(kkt) {
            let rays = self.bounce_rays(hit.point, v, n, material, rng);
            color += self.global_effect(&rays, level, kt, kkt, rng);
        }
        color
    }

    /// Average contribution of secondary rays, each weighted by `kx`.
    fn global_effect(
        &self,
        rays: &[Ray],
        level: u32,
        kx: Color,
        kkx: Color,
        rng: &mut dyn RngCore,
    ) -> Color {
        if rays.is_empty() {
            return Color::ZERO;
        }
        let sum = rays.iter().fold(Color::ZERO, |acc, ray| {
            let seen = match self.closest_hit(ray) {
                Some(next) => self.color_recursive(&next, ray, level - 1, kkx, rng),
                None => self.scene.background(),
            };
            acc + seen * kx
        });
        sum / rays.len() as f64
    }

    /// Secondary rays leaving `point` around the ideal direction.
    ///
    /// Without glossy sampling, or for a perfectly smooth material, this is
    /// the single ideal ray.
    fn bounce_rays(
        &self,
        point: Point3,
        ideal: Vector3,
        n: Vector3,
        material: &Material,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray> {
        let directions = if self.shading.glossy {
            glossy_directions(ideal, n, material.kg(), self.shading.glossy_rays, rng)
        } else {
            vec![ideal]
        };
        directions
            .into_iter()
            .map(|direction| Ray::offset(point, direction, n))
            .collect()
    }
}

impl Integrator for RayTracer<'_> {
    fn validate(&self) -> RenderResult<()> {
        self.shading.validate()
    }

    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.closest_hit(ray) {
            Some(hit) => self.color(&hit, ray, rng),
            None => self.scene.background(),
        }
    }
}

fn diffuse(material: &Material, nl: f64) -> Color {
    material.kd() * nl.abs()
}

fn specular(material: &Material, n: Vector3, l: Vector3, nl: f64, v: Vector3) -> Color {
    let r = (l - n * (2.0 * nl)).normalize();
    let minus_vr = align_zero(-v.dot(r));
    if minus_vr <= 0.0 {
        return Color::ZERO;
    }
    material.ks() * minus_vr.powi(material.shininess())
}

/// The ideal direction followed by `count` hemisphere samples on the ideal
/// direction's side of the surface, each pulled toward the ideal by `kg`.
fn glossy_directions(
    ideal: Vector3,
    n: Vector3,
    kg: f64,
    count: u32,
    rng: &mut dyn RngCore,
) -> Vec<Vector3> {
    let mut directions = vec![ideal];
    if kg >= 1.0 {
        return directions;
    }
    let axis = if n.dot(ideal) < 0.0 { -n } else { n };
    for _ in 0..count {
        let sample = cosine_hemisphere(axis, rng);
        let blended = sample * (1.0 - kg) + ideal * kg;
        if let Some(direction) = blended.try_normalize() {
            directions.push(direction);
        }
    }
    directions
}
