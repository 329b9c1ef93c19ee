//! Bounded downsampling

use image::imageops;
use tracing::debug;

use crate::image_loader::PixelBuffer;

/// Shrink `buffer` so its longer side is at most `max_dimension`
///
/// Aspect ratio is preserved and target sizes are truncated (at least 1
/// pixel). Downsampling uses area averaging so every source pixel
/// contributes to the result. Images already within bounds are returned
/// unchanged; nothing is ever upscaled.
pub fn resize_bound(buffer: PixelBuffer, max_dimension: u32) -> PixelBuffer {
    let (width, height) = buffer.dimensions();
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return buffer;
    }

    let scaled = |side: u32| ((side as u64 * max_dimension as u64 / longest as u64) as u32).max(1);
    let (new_width, new_height) = if width >= height {
        (max_dimension, scaled(height))
    } else {
        (scaled(width), max_dimension)
    };
    debug!(width, height, new_width, new_height, "downsampling image");

    imageops::thumbnail(&buffer, new_width, new_height)
}
