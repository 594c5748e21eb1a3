//! Surface material for Phong shading and recursive transport.

use lumo_math::{Color, DVec3, Interval};

/// Per-channel attenuation factors describing how a surface responds to light.
///
/// Every factor is kept in [0, 1] per channel; the setters clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    kd: DVec3,
    ks: DVec3,
    kt: DVec3,
    kr: DVec3,
    shininess: i32,
    kg: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            shininess: 0,
            kg: 1.0,
        }
    }
}

fn clamp_factor(name: &str, value: DVec3) -> DVec3 {
    let clamped = DVec3::new(
        Interval::UNIT.clamp(value.x),
        Interval::UNIT.clamp(value.y),
        Interval::UNIT.clamp(value.z),
    );
    if clamped != value {
        log::debug!("Material {} {:?} clamped to {:?}", name, value, clamped);
    }
    clamped
}

impl Material {
    /// A black, opaque, non-reflective material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffuse coefficient.
    pub fn with_kd(mut self, kd: DVec3) -> Self {
        self.kd = clamp_factor("kd", kd);
        self
    }

    pub fn with_kd_scalar(self, kd: f64) -> Self {
        self.with_kd(DVec3::splat(kd))
    }

    /// Specular coefficient.
    pub fn with_ks(mut self, ks: DVec3) -> Self {
        self.ks = clamp_factor("ks", ks);
        self
    }

    pub fn with_ks_scalar(self, ks: f64) -> Self {
        self.with_ks(DVec3::splat(ks))
    }

    /// Transparency: the fraction of light passing straight through.
    pub fn with_kt(mut self, kt: DVec3) -> Self {
        self.kt = clamp_factor("kt", kt);
        self
    }

    pub fn with_kt_scalar(self, kt: f64) -> Self {
        self.with_kt(DVec3::splat(kt))
    }

    /// Reflectivity: the fraction of light mirrored.
    pub fn with_kr(mut self, kr: DVec3) -> Self {
        self.kr = clamp_factor("kr", kr);
        self
    }

    pub fn with_kr_scalar(self, kr: f64) -> Self {
        self.with_kr(DVec3::splat(kr))
    }

    /// Phong specular exponent.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Glossiness of reflection and refraction.
    ///
    /// 1 keeps the ideal direction only; 0 scatters over the whole hemisphere.
    pub fn with_kg(mut self, kg: f64) -> Self {
        self.kg = Interval::UNIT.clamp(kg);
        self
    }

    #[inline]
    pub fn kd(&self) -> DVec3 {
        self.kd
    }

    #[inline]
    pub fn ks(&self) -> DVec3 {
        self.ks
    }

    #[inline]
    pub fn kt(&self) -> DVec3 {
        self.kt
    }

    #[inline]
    pub fn kr(&self) -> DVec3 {
        self.kr
    }

    #[inline]
    pub fn shininess(&self) -> i32 {
        self.shininess
    }

    #[inline]
    pub fn kg(&self) -> f64 {
        self.kg
    }

    /// True if no light passes through the surface.
    pub fn is_opaque(&self) -> bool {
        self.kt == Color::ZERO
    }
}
