//! Post-process alpha masking used for the icon's rounded outer silhouette

use crate::compositor::Shape;
use crate::error::{IconError, Result};
use crate::pixel_buffer::PixelBuffer;
use image::{GrayImage, Luma};

/// A rounded rectangle inset `margin` pixels from every edge of the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedMask {
    /// Inset from each edge, in pixels
    pub margin: u32,
    pub corner_radius: u32,
}

impl RoundedMask {
    pub const fn new(margin: u32, corner_radius: u32) -> Self {
        Self {
            margin,
            corner_radius,
        }
    }

    /// Single-channel mask: 255 inside the rounded rectangle, 0 outside.
    pub fn build(&self, size: u32) -> GrayImage {
        let far = size as f32 - self.margin as f32;
        let shape = Shape::rounded_rect(
            self.margin as f32,
            self.margin as f32,
            far,
            far,
            self.corner_radius as f32,
        );
        GrayImage::from_fn(size, size, |x, y| {
            if shape.contains(x as f32, y as f32) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}

/// Replaces every pixel's alpha with `alpha · mask / 255`. Color channels are kept.
///
/// The mask must have the same dimensions as the buffer.
pub fn apply_mask(buf: &mut PixelBuffer, mask: &GrayImage) -> Result<()> {
    let size = buf.size();
    if mask.dimensions() != (size, size) {
        let (w, h) = mask.dimensions();
        return Err(IconError::invalid_spec(format!(
            "mask is {w}x{h}, buffer is {size}x{size}"
        )));
    }
    for (x, y, m) in mask.enumerate_pixels() {
        let px = buf.pixel_mut(x, y);
        px.0[3] = ((px.0[3] as u32 * m.0[0] as u32 + 127) / 255) as u8;
    }
    Ok(())
}

/// Builds `mask` at the buffer's size and applies it.
pub fn apply_rounded_mask(buf: &mut PixelBuffer, mask: RoundedMask) -> Result<()> {
    let built = mask.build(buf.size());
    apply_mask(buf, &built)
}
