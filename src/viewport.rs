//! Drawing-surface size bookkeeping for the resize handler.

/// Upper bound on the device pixel ratio used for the drawing buffer; keeps
/// fragment cost bounded on high-density displays.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Logical (CSS pixel) size of the canvas plus the applied pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// `device_pixel_ratio` is clamped to `max_pixel_ratio`; values that are
    /// not finite or not positive fall back to 1.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio: ratio.min(max_pixel_ratio),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height; a zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Physical size of the drawing buffer.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f64 * self.pixel_ratio).floor() as u32;
        (scale(self.width), scale(self.height))
    }
}
