//! # Season Colors
//!
//! A Rust crate for colorimetric analysis of photographs against a
//! four-season color harmony model.
//!
//! This library extracts and classifies the dominant colors of an image by:
//! - Downsampling and suppressing very light and very dark background pixels
//! - Clustering the remaining pixels into a handful of dominant colors
//! - Classifying each color by temperature, saturation and luminosity
//! - Matching each color to the nearest seasonal reference palette
//!
//! ## Example
//!
//! ```rust,no_run
//! use season_colors::{analyze, PaletteVerdict};
//! use std::path::Path;
//!
//! let verdict: PaletteVerdict = analyze(Path::new("portrait.jpg"), 5, true)?;
//! println!("Season: {:?}, confidence: {:.3}", verdict.dominant_season, verdict.overall_confidence);
//! # Ok::<(), season_colors::AnalysisError>(())
//! ```

pub mod analyzer;
pub mod classification;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod preprocessing;

pub use analyzer::{AnalysisReport, ColorimetryAnalyzer, DebugOutput};
pub use classification::{
    ColorVerdict, LuminosityBand, PaletteVerdict, SaturationBand, Season, Temperature,
};
pub use color::ColorSample;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use image_loader::{ImageInput, PixelBuffer};

fn analyzer_for(n_colors: usize, remove_background: bool) -> Result<ColorimetryAnalyzer> {
    let config = AnalysisConfig::default()
        .with_n_colors(n_colors)
        .with_background(remove_background);
    ColorimetryAnalyzer::new(config)
}

/// Analyze the dominant colors of an image
///
/// This is the main entry point. The input may be encoded image bytes, a
/// path, or a base64 string.
///
/// # Arguments
///
/// * `input` - Image to analyze
/// * `n_colors` - Number of dominant colors to extract (1-255)
/// * `remove_background` - Whether to apply background suppression
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The input cannot be resolved to image bytes
/// - The bytes cannot be decoded as an image
/// - `n_colors` is out of range
pub fn analyze(
    input: impl Into<ImageInput>,
    n_colors: usize,
    remove_background: bool,
) -> Result<PaletteVerdict> {
    analyzer_for(n_colors, remove_background)?.analyze(input)
}

/// Same as [`analyze`], also returning the intermediate images
pub fn analyze_debug(
    input: impl Into<ImageInput>,
    n_colors: usize,
    remove_background: bool,
) -> Result<(PaletteVerdict, DebugOutput)> {
    analyzer_for(n_colors, remove_background)?.analyze_debug(input)
}

/// Same as [`analyze`], with failures folded into an error report
pub fn analyze_report(
    input: impl Into<ImageInput>,
    n_colors: usize,
    remove_background: bool,
) -> AnalysisReport {
    analyzer_for(n_colors, remove_background)
        .and_then(|analyzer| analyzer.analyze(input))
        .into()
}

/// Analyze an image given as a JSON value (string or byte array)
pub fn analyze_json(
    input: serde_json::Value,
    n_colors: usize,
    remove_background: bool,
) -> AnalysisReport {
    ImageInput::try_from(input)
        .and_then(|input| analyze(input, n_colors, remove_background))
        .into()
}

/// Classify a single `#RRGGBB` color
pub fn analyze_color(hex: &str) -> Result<ColorVerdict> {
    ColorimetryAnalyzer::default().analyze_color(hex)
}
