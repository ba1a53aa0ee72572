//! RGBA image artifact produced by a render job.
//!
//! Exterior pixels stay fully transparent; interior pixels carry the mapped
//! field color at full opacity.
use crate::field::color::Rgb;

/// A canvas-sized RGBA byte buffer, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, Default)]
pub struct FieldImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA bytes; alpha 0 marks exterior pixels.
    pub data: Vec<u8>,
}

impl FieldImage {
    /// Create a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }

    /// Set an interior pixel to an opaque color. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color.r;
            self.data[i + 1] = color.g;
            self.data[i + 2] = color.b;
            self.data[i + 3] = 255;
        }
    }

    /// RGBA value at a pixel, `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y)
            .map(|i| [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Whether the pixel is opaque (i.e. interior and painted).
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).map(|p| p[3] == 255).unwrap_or(false)
    }
}
