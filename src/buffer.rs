use crate::color::Color;
use crate::error::EditorError;
use image::ImageFormat;
use std::io::Cursor;

/// A W×H grid of opaque pixels backing a single layer.
///
/// Buffers are owned exclusively by one layer (or held as the derived
/// display buffer); nothing shares mutable access to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Creates a buffer filled with the background color (opaque white).
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::WHITE)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel at (x, y), or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y). Out-of-bounds writes are silent no-ops;
    /// returns whether a pixel was written.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> bool {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
            true
        } else {
            false
        }
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Copies every pixel from `src` over this buffer.
    ///
    /// All pixels are opaque, so compositing a layer is a plain overwrite.
    /// Both buffers must have identical dimensions.
    pub fn overwrite(&mut self, src: &PixelBuffer) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// Flattens the grid into interleaved RGBA bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.channels());
        }
        bytes
    }

    /// Encodes the buffer as PNG. Used for history snapshots and image export.
    pub fn to_png(&self) -> Result<Vec<u8>, EditorError> {
        let mut out = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut out,
            &self.to_rgba_bytes(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|err| EditorError::InvalidState(format!("failed to encode buffer: {err}")))?;
        Ok(out.into_inner())
    }

    /// Decodes a PNG produced by [`PixelBuffer::to_png`].
    pub fn from_png(bytes: &[u8]) -> Result<Self, EditorError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|err| EditorError::InvalidState(format!("failed to decode buffer: {err}")))?
            .into_rgba8();
        let (width, height) = decoded.dimensions();
        let pixels = decoded
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Color { r, g, b, a }
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}
