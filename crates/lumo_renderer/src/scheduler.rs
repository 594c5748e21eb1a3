//! Per-pixel work distribution for render workers.
//!
//! A shared atomic cursor hands out pixels in row-major order, one at a time,
//! to whichever worker asks next. A second counter tracks completed pixels
//! for progress reporting and completion checks.

use std::sync::atomic::{AtomicU64, Ordering};

/// One unit of render work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Row-major index, `y * width + x`
    pub index: u64,
}

/// Thread-safe claim-next cursor over an image's pixels.
#[derive(Debug)]
pub struct PixelScheduler {
    width: u32,
    total: u64,
    next: AtomicU64,
    done: AtomicU64,
    /// Completed pixels between progress reports; 0 disables reporting.
    report_every: u64,
}

impl PixelScheduler {
    /// Create a scheduler for a `width` x `height` image with progress
    /// logged every `progress_interval` percent.
    pub fn new(width: u32, height: u32, progress_interval: u32) -> Self {
        let total = width as u64 * height as u64;
        let report_every = if progress_interval == 0 {
            0
        } else {
            (total * progress_interval as u64 / 100).max(1)
        };
        Self {
            width,
            total,
            next: AtomicU64::new(0),
            done: AtomicU64::new(0),
            report_every,
        }
    }

    /// Claim the next unrendered pixel, or `None` once every pixel is taken.
    pub fn claim(&self) -> Option<Pixel> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        let width = self.width as u64;
        Some(Pixel {
            x: (index % width) as u32,
            y: (index / width) as u32,
            index,
        })
    }

    /// Report one claimed pixel as rendered.
    pub fn complete(&self) {
        let done = self.done.fetch_add(1, Ordering::AcqRel) + 1;
        if self.report_every > 0 && (done % self.report_every == 0 || done == self.total) {
            log::info!(
                "Rendered {}% ({}/{} pixels)",
                done * 100 / self.total,
                done,
                self.total
            );
        }
    }

    /// Number of pixels reported complete.
    pub fn rendered(&self) -> u64 {
        self.done.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// True once every pixel has been reported complete.
    pub fn is_finished(&self) -> bool {
        self.rendered() >= self.total
    }
}
