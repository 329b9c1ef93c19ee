//! Perceptual band classifiers
//!
//! Three independent step functions over HSV (plus Lab a* for ambiguous
//! hues). Boundaries come from [`crate::constants::bands`]; each lower bound
//! is inclusive for the band above it.

use serde::{Deserialize, Serialize};

use crate::constants::bands;

/// Color temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
}

/// HSV saturation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationBand {
    Low,
    Medium,
    High,
}

/// HSV value band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuminosityBand {
    Dark,
    Medium,
    Light,
}

/// Classify warm/cool from hue (degrees) with Lab a* as tie-breaker
///
/// Reds, oranges and yellows (0-60°, 330-360°) are warm; greens through blues
/// (120-240°) are cool. In the yellow-green and violet transition bands the
/// sign of a* decides: positive (reddish) is warm.
pub fn classify_temperature(hue: f64, lab_a: f64) -> Temperature {
    let hue = hue.rem_euclid(360.0);
    let in_range = |(low, high): (f64, f64)| hue >= low && hue <= high;

    if bands::WARM_HUES.iter().copied().any(&in_range) {
        Temperature::Warm
    } else if in_range(bands::COOL_HUES) {
        Temperature::Cool
    } else if lab_a > 0.0 {
        Temperature::Warm
    } else {
        Temperature::Cool
    }
}

/// Classify HSV saturation (percent): <30 low, <70 medium, else high
pub fn classify_saturation(saturation: f64) -> SaturationBand {
    if saturation < bands::SATURATION_LOW_BELOW {
        SaturationBand::Low
    } else if saturation < bands::SATURATION_MEDIUM_BELOW {
        SaturationBand::Medium
    } else {
        SaturationBand::High
    }
}

/// Classify HSV value (percent): <35 dark, <65 medium, else light
pub fn classify_luminosity(value: f64) -> LuminosityBand {
    if value < bands::LUMINOSITY_DARK_BELOW {
        LuminosityBand::Dark
    } else if value < bands::LUMINOSITY_MEDIUM_BELOW {
        LuminosityBand::Medium
    } else {
        LuminosityBand::Light
    }
}
