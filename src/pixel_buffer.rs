//! Square RGBA8888 raster used as the drawing surface

use crate::error::{IconError, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::io::Write;

/// Straight (non-premultiplied) 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

/// A square S×S raster whose dimensions never change after creation.
///
/// Resizing always produces a new buffer (see [`crate::resample`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

/// Creates a fully transparent buffer of `size`×`size` pixels.
pub fn new_buffer(size: u32) -> Result<PixelBuffer> {
    PixelBuffer::new(size)
}

impl PixelBuffer {
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(IconError::invalid_spec("buffer size must be positive"));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(size, size, Color::TRANSPARENT.into()),
        })
    }

    /// Wraps an existing image, rejecting empty or non-square ones.
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(IconError::invalid_spec("image must not be empty"));
        }
        if w != h {
            return Err(IconError::invalid_spec(format!(
                "image must be square, got {w}x{h}"
            )));
        }
        Ok(Self { image })
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        (*self.image.get_pixel(x, y)).into()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.image.put_pixel(x, y, color.into());
    }

    /// Mutable access to a single pixel, in bounds only.
    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Rgba<u8> {
        self.image.get_pixel_mut(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw row-major RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Encodes the buffer as an 8-bit RGBA PNG.
    pub fn write_png<W: Write>(&self, w: W) -> image::ImageResult<()> {
        let encoder =
            PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
        encoder.write_image(self.as_bytes(), self.size(), self.size(), ColorType::Rgba8)
    }

    pub fn to_png_bytes(&self) -> image::ImageResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_png(&mut buf)?;
        Ok(buf)
    }
}
