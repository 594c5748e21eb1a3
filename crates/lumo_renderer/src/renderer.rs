//! Render orchestration.
//!
//! A [`Renderer`] owns the camera and sampling settings, borrows a ray tracer
//! and an image sink, and drives a pool of workers over a shared
//! [`PixelScheduler`]. Workers buffer their pixels; the sink is written on the
//! calling thread only after every worker has returned.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use lumo_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::image::ImageSink;
use crate::ray_tracer::Integrator;
use crate::sampler::Sampler;
use crate::scheduler::{Pixel, PixelScheduler};

/// Worker threads kept free for the rest of the system when the count is
/// auto-detected.
const RESERVED_THREADS: usize = 2;

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Pixels written to the sink
    pub pixels: u64,
    /// Workers that rendered them
    pub workers: usize,
    pub elapsed: Duration,
}

/// Drives a render from camera rays to the image sink.
pub struct Renderer<'a> {
    camera: Camera,
    config: RenderConfig,
    tracer: Option<&'a dyn Integrator>,
    sink: Option<&'a mut dyn ImageSink>,
}

impl<'a> Renderer<'a> {
    pub fn new(camera: Camera, config: RenderConfig) -> Self {
        Self {
            camera,
            config,
            tracer: None,
            sink: None,
        }
    }

    pub fn with_tracer(mut self, tracer: &'a dyn Integrator) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn with_image_sink(mut self, sink: &'a mut dyn ImageSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every pixel of the sink.
    ///
    /// Nothing is written to the sink unless every pixel rendered.
    pub fn render(&mut self) -> RenderResult<RenderStats> {
        let tracer = self.tracer.ok_or(RenderError::MissingResource("ray tracer"))?;
        let sink = self
            .sink
            .as_deref_mut()
            .ok_or(RenderError::MissingResource("image sink"))?;

        self.config.validate()?;
        self.camera.validate()?;
        tracer.validate()?;

        let (width, height) = (sink.width(), sink.height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                width, height
            )));
        }

        let workers = resolve_workers(&self.config);
        let sampler = Sampler::from_config(&self.config);
        let scheduler = PixelScheduler::new(width, height, self.config.progress_interval);
        log::info!(
            "Rendering {}x{} with {} worker(s), {:?} sampling",
            width,
            height,
            workers,
            sampler
        );
        log::debug!("Render config: {:?}", self.config);

        let start = Instant::now();
        let context = WorkerContext {
            camera: &self.camera,
            tracer,
            sampler,
            scheduler: &scheduler,
            width,
            height,
            seed: self.config.seed,
        };

        let results = if workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("lumo-worker-{}", index))
                .build()?;
            pool.broadcast(|_| context.run_guarded())
        } else {
            vec![context.run_guarded()]
        };

        let mut rendered = Vec::with_capacity(scheduler.total() as usize);
        for result in results {
            match result {
                Ok(pixels) => rendered.extend(pixels),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    log::error!("Render worker panicked: {}", message);
                    return Err(RenderError::WorkerPanicked(message));
                }
            }
        }
        if !scheduler.is_finished() || rendered.len() as u64 != scheduler.total() {
            return Err(RenderError::Incomplete {
                rendered: rendered.len() as u64,
                total: scheduler.total(),
            });
        }

        for (pixel, color) in &rendered {
            sink.write_pixel(pixel.x, pixel.y, *color);
        }

        let elapsed = start.elapsed();
        log::info!("Rendered {} pixels in {:.2?}", rendered.len(), elapsed);
        Ok(RenderStats {
            pixels: rendered.len() as u64,
            workers,
            elapsed,
        })
    }
}

/// Read-only state shared by every worker.
struct WorkerContext<'a> {
    camera: &'a Camera,
    tracer: &'a dyn Integrator,
    sampler: Sampler,
    scheduler: &'a PixelScheduler,
    width: u32,
    height: u32,
    seed: u64,
}

impl WorkerContext<'_> {
    /// Claim and render pixels until the scheduler runs dry.
    fn run(&self) -> Vec<(Pixel, Color)> {
        let mut pixels = Vec::new();
        while let Some(pixel) = self.scheduler.claim() {
            let mut rng = pixel_rng(self.seed, pixel.index);
            let color = self.sampler.sample_pixel(
                self.camera,
                self.tracer,
                self.width,
                self.height,
                pixel.x,
                pixel.y,
                &mut rng,
            );
            pixels.push((pixel, color));
            self.scheduler.complete();
        }
        pixels
    }

    fn run_guarded(&self) -> std::thread::Result<Vec<(Pixel, Color)>> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run()))
    }
}

/// Random generator for one pixel, independent of which worker renders it.
pub fn pixel_rng(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Worker count for `config`: 1 without multithreading, else the configured
/// thread count, else the available parallelism minus a reserve (at least 1).
pub fn resolve_workers(config: &RenderConfig) -> usize {
    if !config.multithreading {
        return 1;
    }
    if config.threads > 0 {
        return config.threads;
    }
    match std::thread::available_parallelism() {
        Ok(n) => n.get().saturating_sub(RESERVED_THREADS).max(1),
        Err(e) => {
            log::warn!("Cannot detect available parallelism ({}), using 1 worker", e);
            1
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
