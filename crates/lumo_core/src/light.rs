//! Light sources.
//!
//! All directions returned here are *incidence* directions: the unit vector
//! along which light travels from the source toward the lit point.

use lumo_math::{Color, DVec3, Point3, Vector3};
use rand::RngCore;

use crate::error::{GeometryError, GeometryResult};
use crate::sampling::{orthonormal_basis, random_in_unit_disk};

/// Uniform light present everywhere in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of color `ia` scaled per channel by `ka`.
    pub fn new(ia: Color, ka: DVec3) -> Self {
        Self { intensity: ia * ka }
    }

    #[inline]
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A source of direct illumination.
pub trait LightSource: Send + Sync {
    /// Intensity arriving at `point`, before any shadowing.
    fn intensity_at(&self, point: Point3) -> Color;

    /// Unit direction from the source toward `point`, or `None` when the
    /// point coincides with a positional source.
    fn incidence(&self, point: Point3) -> Option<Vector3>;

    /// Distance from `point` to the source.
    fn distance(&self, point: Point3) -> f64;

    /// The nominal incidence followed by up to `count` incidences from points
    /// sampled uniformly on a disk of `radius` around the source, facing `point`.
    ///
    /// Sources without a position only return the nominal incidence.
    fn sample_incidences(
        &self,
        point: Point3,
        _radius: f64,
        _count: u32,
        _rng: &mut dyn RngCore,
    ) -> Vec<Vector3> {
        self.incidence(point).into_iter().collect()
    }
}

/// Omnidirectional light at a position with `1 / (kc + kl d + kq d^2)` falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// A point light with no falloff (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    fn attenuation(&self, point: Point3) -> f64 {
        let d = self.position.distance(point);
        self.kc + self.kl * d + self.kq * d * d
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point3) -> Color {
        self.intensity / self.attenuation(point)
    }

    fn incidence(&self, point: Point3) -> Option<Vector3> {
        (point - self.position).try_normalize()
    }

    fn distance(&self, point: Point3) -> f64 {
        self.position.distance(point)
    }

    fn sample_incidences(
        &self,
        point: Point3,
        radius: f64,
        count: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Vector3> {
        let Some(nominal) = self.incidence(point) else {
            return Vec::new();
        };
        let mut incidences = Vec::with_capacity(count as usize + 1);
        incidences.push(nominal);
        if radius <= 0.0 {
            return incidences;
        }

        let (across, forward) = orthonormal_basis(nominal);
        for _ in 0..count {
            let offset = random_in_unit_disk(rng) * radius;
            let sample = self.position + across * offset.x + forward * offset.y;
            if let Some(l) = (point - sample).try_normalize() {
                incidences.push(l);
            }
        }
        incidences
    }
}

/// A point light emitting mostly along `direction`.
///
/// Intensity is scaled by `max(0, direction . l)^narrow_beam`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector3,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, direction: Vector3) -> GeometryResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("spot light direction"))?;
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction,
            narrow_beam: 1.0,
        })
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Beam concentration exponent; larger is narrower.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let Some(l) = self.point.incidence(point) else {
            return Color::ZERO;
        };
        let cos = self.direction.dot(l);
        if cos <= 0.0 {
            return Color::ZERO;
        }
        self.point.intensity_at(point) * cos.powf(self.narrow_beam)
    }

    fn incidence(&self, point: Point3) -> Option<Vector3> {
        self.point.incidence(point)
    }

    fn distance(&self, point: Point3) -> f64 {
        self.point.distance(point)
    }

    fn sample_incidences(
        &self,
        point: Point3,
        radius: f64,
        count: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Vector3> {
        self.point.sample_incidences(point, radius, count, rng)
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector3) -> GeometryResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("light direction"))?;
        Ok(Self {
            intensity,
            direction,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point3) -> Color {
        self.intensity
    }

    fn incidence(&self, _point: Point3) -> Option<Vector3> {
        Some(self.direction)
    }

    fn distance(&self, _point: Point3) -> f64 {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ambient_light() {
        let ambient = AmbientLight::new(Color::new(1.0, 0.5, 0.2), DVec3::splat(0.5));
        assert_eq!(ambient.intensity(), Color::new(0.5, 0.25, 0.1));
        assert_eq!(AmbientLight::default().intensity(), Color::ZERO);
    }

    #[test]
    fn test_point_light_falloff() {
        let light = PointLight::new(Color::splat(100.0), Point3::ZERO)
            .with_kl(1.0)
            .with_kq(0.5);
        let p = Point3::new(0.0, 2.0, 0.0);

        // 1 + 2 + 0.5 * 4 = 5
        assert_eq!(light.intensity_at(p), Color::splat(20.0));
        assert_eq!(light.distance(p), 2.0);
        assert_eq!(light.incidence(p), Some(Vector3::Y));
    }

    #[test]
    fn test_point_light_at_its_position() {
        let light = PointLight::new(Color::ONE, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(light.incidence(Point3::new(1.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_point_light_sampled_incidences() {
        let light = PointLight::new(Color::ONE, Point3::new(0.0, 10.0, 0.0));
        let p = Point3::ZERO;
        let mut rng = StdRng::seed_from_u64(42);

        let samples = light.sample_incidences(p, 2.0, 16, &mut rng);
        assert_eq!(samples.len(), 17);
        assert_eq!(samples[0], -Vector3::Y);
        for l in &samples[1..] {
            assert!((l.length() - 1.0).abs() < 1e-12);
            // Every sample comes from within the disk around the light
            let spread = (l.dot(-Vector3::Y)).acos();
            assert!(spread <= (2.0f64 / 10.0).atan() + 1e-9);
        }

        // Zero radius keeps just the nominal direction
        assert_eq!(light.sample_incidences(p, 0.0, 16, &mut rng).len(), 1);
    }

    #[test]
    fn test_spot_light_beam() {
        let light = SpotLight::new(Color::ONE, Point3::ZERO, -Vector3::Y)
            .unwrap()
            .with_narrow_beam(2.0);

        // On the beam axis
        assert_eq!(light.intensity_at(Point3::new(0.0, -3.0, 0.0)), Color::ONE);

        // 60 degrees off axis: cos^2 = 0.25
        let off = Point3::new((3.0f64).sqrt(), -1.0, 0.0);
        let intensity = light.intensity_at(off);
        assert!((intensity.x - 0.25).abs() < 1e-12);

        // Behind the spot
        assert_eq!(light.intensity_at(Point3::new(0.0, 3.0, 0.0)), Color::ZERO);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::splat(0.5), Vector3::new(0.0, 0.0, -2.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(light.incidence(Point3::new(4.0, 5.0, 6.0)), Some(-Vector3::Z));
        assert_eq!(light.distance(Point3::ZERO), f64::INFINITY);
        assert_eq!(light.sample_incidences(Point3::ZERO, 5.0, 10, &mut rng).len(), 1);
        assert!(DirectionalLight::new(Color::ONE, Vector3::ZERO).is_err());
    }
}
