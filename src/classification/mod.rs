//! Colorimetric classification module
//!
//! Classifies dominant colors along four independent axes (temperature,
//! saturation, luminosity, seasonal harmony) and aggregates the per-color
//! results into a palette-level verdict.

pub mod bands;
pub mod season;
pub mod verdict;

pub use bands::{
    classify_luminosity, classify_saturation, classify_temperature, LuminosityBand,
    SaturationBand, Temperature,
};
pub use season::{Season, SeasonMatch, SeasonPalette};
pub use verdict::{
    ColorVerdict, LuminosityCounts, PaletteVerdict, SaturationCounts, TemperatureCounts,
};
