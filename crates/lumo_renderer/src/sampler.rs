//! Rays per pixel: center only, a uniform grid, or adaptive refinement.

use lumo_math::Color;
use rand::RngCore;

use crate::camera::{grid_offset, Camera};
use crate::config::{RenderConfig, SamplingMode};
use crate::ray_tracer::Integrator;

/// Pixel sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampler {
    /// The pixel center ray.
    Single,
    /// `rays` x `rays` cell-center rays plus the center ray, averaged.
    Grid { rays: u32 },
    /// Quadrant refinement over a `rays` x `rays` grid, at most `depth` levels deep.
    Adaptive { rays: u32, depth: u32 },
}

impl Sampler {
    pub fn from_config(config: &RenderConfig) -> Self {
        match config.sampling_mode() {
            SamplingMode::Single => Sampler::Single,
            SamplingMode::Grid => Sampler::Grid {
                rays: config.anti_aliasing_rays,
            },
            SamplingMode::Adaptive => Sampler::Adaptive {
                rays: config.anti_aliasing_rays,
                depth: config.adaptive_depth,
            },
        }
    }

    /// Color of pixel (`x`, `y`) in an `nx` x `ny` image.
    #[allow(clippy::too_many_arguments)]
    pub fn sample_pixel(
        &self,
        camera: &Camera,
        tracer: &dyn Integrator,
        nx: u32,
        ny: u32,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        match *self {
            Sampler::Single => tracer.trace_ray(&camera.construct_ray(nx, ny, x, y), rng),
            Sampler::Grid { rays } => {
                let bundle = camera.construct_anti_aliasing_rays(nx, ny, x, y, rays);
                tracer.trace_rays(&bundle, rng)
            }
            Sampler::Adaptive { rays, depth } => {
                let mut grid = GridTracer {
                    camera,
                    tracer,
                    nx,
                    ny,
                    x,
                    y,
                    n: rays,
                    rng,
                };
                let last = rays.saturating_sub(1) as f64;
                let corners = [
                    grid.trace(0.0, 0.0),
                    grid.trace(last, 0.0),
                    grid.trace(0.0, last),
                    grid.trace(last, last),
                ];
                refine(&mut grid, Region::new(0.0, 0.0, last, last), corners, depth)
            }
        }
    }
}

/// Traces rays at grid positions inside one pixel.
///
/// Positions are in grid-index units: `(0, 0)` is the top-left cell center
/// and `(n - 1, n - 1)` the bottom-right one.
struct GridTracer<'a> {
    camera: &'a Camera,
    tracer: &'a dyn Integrator,
    nx: u32,
    ny: u32,
    x: u32,
    y: u32,
    n: u32,
    rng: &'a mut dyn RngCore,
}

impl GridTracer<'_> {
    fn trace(&mut self, gx: f64, gy: f64) -> Color {
        let ray = self.camera.construct_ray_through(
            self.nx,
            self.ny,
            self.x,
            self.y,
            grid_offset(gx, self.n),
            grid_offset(gy, self.n),
        );
        self.tracer.trace_ray(&ray, &mut *self.rng)
    }
}

/// Axis-aligned rectangle of grid positions.
#[derive(Debug, Clone, Copy)]
struct Region {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Region {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x0, self.y0),
            (self.x1, self.y0),
            (self.x0, self.y1),
            (self.x1, self.y1),
        ]
    }

    fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// The quadrant with `corner` and `center` at opposite vertices.
    fn quadrant(corner: (f64, f64), center: (f64, f64)) -> Self {
        Self::new(
            corner.0.min(center.0),
            corner.1.min(center.1),
            corner.0.max(center.0),
            corner.1.max(center.1),
        )
    }
}

/// Color at `position`, reusing an already traced sample when one matches.
fn color_at(grid: &mut GridTracer<'_>, position: (f64, f64), known: &[((f64, f64), Color)]) -> Color {
    known
        .iter()
        .find(|(p, _)| *p == position)
        .map(|(_, color)| *color)
        .unwrap_or_else(|| grid.trace(position.0, position.1))
}

/// Adaptive color of `region` given its traced corner colors.
fn refine(grid: &mut GridTracer<'_>, region: Region, corner_colors: [Color; 4], depth: u32) -> Color {
    let center = region.center();
    let center_color = grid.trace(center.0, center.1);

    if corner_colors.iter().all(|c| *c == center_color) {
        return center_color;
    }
    if depth == 0 {
        return corner_colors.iter().fold(center_color, |acc, c| acc + *c) / 5.0;
    }

    let mut sum = center_color;
    for (corner, color) in region.corners().into_iter().zip(corner_colors) {
        if color == center_color {
            sum += color;
            continue;
        }
        let quadrant = Region::quadrant(corner, center);
        let known = [(corner, color), (center, center_color)];
        let sub_colors = quadrant
            .corners()
            .map(|position| color_at(grid, position, &known));
        sum += (color + refine(grid, quadrant, sub_colors, depth - 1)) / 2.0;
    }
    sum / 5.0
}
