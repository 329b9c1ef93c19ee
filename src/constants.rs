//! Calibration constants and reference values for palette analysis
//!
//! This module contains compile-time constants for preprocessing,
//! clustering and classification.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight. All Lab values in
/// this crate are relative to it.
pub mod d65 {
    /// D65 white point in CIE XYZ color space (array form)
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f64; 3] = [0.95047, 1.00000, 1.08883];

    /// Linear sRGB to XYZ, rows X, Y, Z (four-decimal coefficients)
    pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];

    /// CIE Lab linear/cube-root breakpoint (6/29)
    pub const LAB_DELTA: f64 = 6.0 / 29.0;
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f64; 3] = d65::WHITE_POINT_XYZ;

/// Image preprocessing parameters
pub mod processing {
    /// Longest side allowed before downsampling
    pub const MAX_DIMENSION: u32 = 800;

    /// Default background suppression sensitivity (0 = off, 1 = aggressive)
    pub const BACKGROUND_SENSITIVITY: f32 = 0.3;

    /// Fraction of the 8-bit lightness range cut at each end per unit of sensitivity
    pub const SENSITIVITY_SPAN: f64 = 0.2;

    /// Replacement color for suppressed pixels
    pub const BACKGROUND_FILL: [u8; 3] = [255, 255, 255];

    /// Pixels whose channel sum reaches this value are treated as background
    pub const FOREGROUND_SUM_THRESHOLD: u32 = 750;

    /// Below this many foreground pixels every pixel is clustered instead
    pub const MIN_FOREGROUND_PIXELS: usize = 100;
}

/// K-means clustering parameters
pub mod clustering {
    /// Default number of dominant colors
    pub const DEFAULT_COLORS: usize = 5;

    /// Upper bound on clusters (labels are stored as `u8`)
    pub const MAX_COLORS: usize = 255;

    /// Independent k-means++ initializations; the lowest-inertia run wins
    pub const RUNS: usize = 10;

    /// Iteration cap per run
    pub const MAX_ITERATIONS: usize = 100;

    /// Centroid movement under which a run is considered converged (sRGB 0-1 scale)
    pub const CONVERGENCE: f32 = 0.0025;

    /// Base random seed; run `i` uses `SEED + i`
    pub const SEED: u64 = 42;
}

/// Band boundaries for the per-color classifiers
pub mod bands {
    /// HSV saturation (percent) below which saturation is low
    pub const SATURATION_LOW_BELOW: f64 = 30.0;
    /// HSV saturation (percent) below which saturation is medium
    pub const SATURATION_MEDIUM_BELOW: f64 = 70.0;

    /// HSV value (percent) below which a color is dark
    pub const LUMINOSITY_DARK_BELOW: f64 = 35.0;
    /// HSV value (percent) below which a color is medium
    pub const LUMINOSITY_MEDIUM_BELOW: f64 = 65.0;

    /// Hue ranges (degrees, inclusive) that are warm regardless of Lab a*
    pub const WARM_HUES: [(f64, f64); 2] = [(0.0, 60.0), (330.0, 360.0)];
    /// Hue range (degrees, inclusive) that is cool regardless of Lab a*
    pub const COOL_HUES: (f64, f64) = (120.0, 240.0);
}

/// Seasonal matching parameters
pub mod season {
    /// Lab distance at which season confidence reaches zero
    pub const CONFIDENCE_DISTANCE_SCALE: f64 = 100.0;
}
