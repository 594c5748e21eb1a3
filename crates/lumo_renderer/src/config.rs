//! Render and shading settings.
//!
//! Both structs deserialize with every field optional, falling back to
//! [`Default`].

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// How rays are distributed over a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// One ray through the pixel center.
    Single,
    /// An N x N grid of cell-center rays plus the center ray, averaged.
    Grid,
    /// Recursive quadrant refinement over the N x N grid.
    Adaptive,
}

/// Pixel sampling and scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Trace several rays per pixel.
    pub anti_aliasing: bool,
    /// Grid side length N for anti-aliasing.
    pub anti_aliasing_rays: u32,
    /// Refine only where samples disagree (needs `anti_aliasing`).
    pub adaptive: bool,
    /// Maximum quadrant subdivision depth for adaptive sampling.
    pub adaptive_depth: u32,
    /// Render on a worker pool.
    pub multithreading: bool,
    /// Worker count; 0 picks the available parallelism minus a reserve.
    pub threads: usize,
    /// Log progress every this many percent; 0 disables progress logging.
    pub progress_interval: u32,
    /// Base seed for the per-pixel random generators.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            anti_aliasing: false,
            anti_aliasing_rays: 10,
            adaptive: false,
            adaptive_depth: 3,
            multithreading: false,
            threads: 0,
            progress_interval: 5,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn sampling_mode(&self) -> SamplingMode {
        match (self.anti_aliasing, self.adaptive) {
            (false, _) => SamplingMode::Single,
            (true, false) => SamplingMode::Grid,
            (true, true) => SamplingMode::Adaptive,
        }
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.anti_aliasing && self.anti_aliasing_rays == 0 {
            return Err(RenderError::InvalidConfig(
                "anti_aliasing_rays must be positive".into(),
            ));
        }
        if self.progress_interval > 100 {
            return Err(RenderError::InvalidConfig(format!(
                "progress_interval must be at most 100, got {}",
                self.progress_interval
            )));
        }
        Ok(())
    }
}

/// Stochastic shading effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Average shadow rays toward a disk around each positional light.
    pub soft_shadows: bool,
    /// Extra shadow rays per light.
    pub soft_shadow_rays: u32,
    /// Radius of the light disk.
    pub soft_shadow_radius: f64,
    /// Scatter reflected and refracted rays by material glossiness.
    pub glossy: bool,
    /// Extra rays per glossy bounce.
    pub glossy_rays: u32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            soft_shadows: false,
            soft_shadow_rays: 10,
            soft_shadow_radius: 10.0,
            glossy: false,
            glossy_rays: 100,
        }
    }
}

impl ShadingConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.soft_shadows {
            if self.soft_shadow_rays == 0 {
                return Err(RenderError::InvalidConfig(
                    "soft_shadow_rays must be positive".into(),
                ));
            }
            if !(self.soft_shadow_radius > 0.0) {
                return Err(RenderError::InvalidConfig(format!(
                    "soft_shadow_radius must be positive, got {}",
                    self.soft_shadow_radius
                )));
            }
        }
        if self.glossy && self.glossy_rays == 0 {
            return Err(RenderError::InvalidConfig("glossy_rays must be positive".into()));
        }
        Ok(())
    }
}
