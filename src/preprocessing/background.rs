//! Background suppression strategies
//!
//! [`BackgroundSuppressor`] is the seam between preprocessing and whatever
//! decides which pixels are background. The only implementation shipped is
//! [`LuminanceGate`], a lightness threshold: paper backgrounds and deep
//! shadows are painted white, midtones (skin, hair, clothing) pass through.
//! It is not segmentation.

use image::Rgb;
use tracing::debug;

use crate::color::ColorConverter;
use crate::constants::processing;
use crate::image_loader::PixelBuffer;
use crate::{AnalysisError, Result};

/// Strategy that overwrites background pixels of a buffer
pub trait BackgroundSuppressor: Send + Sync {
    /// Return the buffer with background pixels replaced
    fn suppress(&self, buffer: PixelBuffer) -> PixelBuffer;
}

/// Lightness gate on the 8-bit L* channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceGate {
    sensitivity: f32,
    converter: ColorConverter,
}

impl Default for LuminanceGate {
    fn default() -> Self {
        Self {
            sensitivity: processing::BACKGROUND_SENSITIVITY,
            converter: ColorConverter::new(),
        }
    }
}

impl LuminanceGate {
    /// Create a gate with sensitivity in 0.0-1.0 (higher = more aggressive)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if sensitivity is outside 0.0-1.0
    pub fn new(sensitivity: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&sensitivity) {
            return Err(AnalysisError::invalid("sensitivity", sensitivity));
        }
        Ok(Self {
            sensitivity,
            ..Self::default()
        })
    }

    /// Exclusive `(lower, upper)` bounds on the 8-bit lightness of kept pixels
    pub fn thresholds(&self) -> (i32, i32) {
        let cut = self.sensitivity as f64 * processing::SENSITIVITY_SPAN;
        let lower = (255.0 * cut) as i32;
        let upper = (255.0 * (1.0 - cut)) as i32;
        (lower, upper)
    }

    /// Whether a pixel survives the gate
    pub fn keeps(&self, rgb: [u8; 3]) -> bool {
        let (lower, upper) = self.thresholds();
        let lightness = self.converter.lightness_8bit(rgb) as i32;
        lightness > lower && lightness < upper
    }
}

impl BackgroundSuppressor for LuminanceGate {
    fn suppress(&self, mut buffer: PixelBuffer) -> PixelBuffer {
        let (lower, upper) = self.thresholds();
        let mut suppressed = 0usize;

        for pixel in buffer.pixels_mut() {
            let lightness = self.converter.lightness_8bit(pixel.0) as i32;
            if lightness <= lower || lightness >= upper {
                *pixel = Rgb(processing::BACKGROUND_FILL);
                suppressed += 1;
            }
        }

        debug!(lower, upper, suppressed, "luminance gate applied");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_default_thresholds() {
        assert_eq!(LuminanceGate::default().thresholds(), (15, 239));
    }

    #[test]
    fn test_threshold_formula() {
        assert_eq!(LuminanceGate::new(0.0).unwrap().thresholds(), (0, 255));
        assert_eq!(LuminanceGate::new(1.0).unwrap().thresholds(), (51, 204));
    }

    #[test]
    fn test_invalid_sensitivity() {
        assert!(LuminanceGate::new(-0.1).is_err());
        assert!(LuminanceGate::new(1.1).is_err());
    }

    #[test]
    fn test_extremes_suppressed_midtones_kept() {
        let gate = LuminanceGate::default();
        assert!(!gate.keeps([255, 255, 255]));
        assert!(!gate.keeps([250, 250, 250]));
        assert!(!gate.keeps([0, 0, 0]));
        assert!(gate.keeps([180, 120, 90]));
        assert!(gate.keeps([0, 0, 255]));
    }

    #[test]
    fn test_suppress_replaces_only_background() {
        let gate = LuminanceGate::default();
        let mut buffer = RgbImage::from_pixel(4, 1, Rgb([180, 120, 90]));
        buffer.put_pixel(0, 0, Rgb([5, 5, 5]));
        buffer.put_pixel(3, 0, Rgb([252, 252, 250]));

        let result = gate.suppress(buffer);
        assert_eq!(result.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [180, 120, 90]);
        assert_eq!(result.get_pixel(2, 0).0, [180, 120, 90]);
        assert_eq!(result.get_pixel(3, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let strategy: Box<dyn BackgroundSuppressor> = Box::new(LuminanceGate::default());
        let buffer = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let result = strategy.suppress(buffer);
        assert!(result.pixels().all(|p| p.0 == [255, 255, 255]));
    }
}
