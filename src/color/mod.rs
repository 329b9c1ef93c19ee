//! Color conversion and extraction module
//!
//! This module handles color space conversions, the derived color samples
//! built from them, and extraction of dominant colors from an image.

pub mod conversion;
pub mod extraction;
pub mod sample;

pub use conversion::{ColorConverter, Lab};
pub use extraction::PaletteExtractor;
pub use sample::{ColorSample, HsvValues, LabValues};
