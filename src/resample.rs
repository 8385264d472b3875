//! Derives smaller (or larger) variants of a rendered icon
//!
//! Filtering is a separable Lanczos kernel with a window radius of 3 lobes
//! (`image`'s `FilterType::Lanczos3`), applied to every channel including alpha.
//! Channels are straight, not premultiplied. The output depends only on the
//! input pixels and the target size.

use crate::error::{IconError, Result};
use crate::pixel_buffer::PixelBuffer;
use image::imageops::{self, FilterType};

/// Resampling kernel used for every derived size
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Produces a new `target_size`×`target_size` buffer. The source is left untouched.
pub fn resample(buf: &PixelBuffer, target_size: u32) -> Result<PixelBuffer> {
    if target_size == 0 {
        return Err(IconError::invalid_spec("target size must be positive"));
    }
    if target_size == buf.size() {
        return Ok(buf.clone());
    }
    let resized = imageops::resize(buf.as_image(), target_size, target_size, RESAMPLE_FILTER);
    PixelBuffer::from_image(resized)
}
