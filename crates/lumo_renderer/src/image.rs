//! Pixel sink interface and an in-memory image buffer.

use lumo_math::{Color, Interval};

/// Destination for rendered pixels.
///
/// Pixel `(0, 0)` is the top-left corner; `x` is the column, `y` the row.
pub trait ImageSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Overwrite every `interval`-th column and row with `color`.
    ///
    /// An `interval` of 0 draws nothing.
    fn print_grid(&mut self, interval: u32, color: Color) {
        if interval == 0 {
            return;
        }
        for y in 0..self.height() {
            for x in 0..self.width() {
                if x % interval == 0 || y % interval == 0 {
                    self.write_pixel(x, y, color);
                }
            }
        }
    }
}

/// Convert a linear color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f64| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

impl ImageSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}
