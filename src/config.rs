//! Configuration structures for the season_colors analysis pipeline.
//!
//! This module defines all tunable parameters for palette analysis,
//! organized into groups for preprocessing and color extraction.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use season_colors::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default().with_n_colors(8);
//! # Ok::<(), season_colors::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`PreprocessingConfig`]: downsampling and background suppression
//! - [`ExtractionConfig`]: foreground selection and k-means parameters

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{clustering, processing};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration for palette analysis.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Preprocessing configuration
    pub preprocessing: PreprocessingConfig,

    /// Dominant color extraction configuration
    pub extraction: ExtractionConfig,
}

/// Preprocessing parameters applied before clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Longest side after downsampling; images are never upscaled
    pub max_dimension: u32,

    /// Background suppression settings
    pub background: BackgroundConfig,
}

/// Luminance gate parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Apply background suppression
    pub enabled: bool,

    /// 0.0-1.0, higher suppresses more of the lightness range
    pub sensitivity: f32,
}

/// Color extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Target number of dominant colors (clamped to the distinct colors present)
    pub n_colors: usize,

    /// Channel sum at or above which a pixel counts as background
    pub foreground_sum_threshold: u32,

    /// Minimum foreground pixels before falling back to the whole image
    pub min_foreground_pixels: usize,

    /// Number of seeded k-means initializations
    pub runs: usize,

    /// Iteration cap per run
    pub max_iterations: usize,

    /// Convergence threshold on centroid movement
    pub convergence: f32,

    /// Base seed for k-means++ initialization
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            preprocessing: PreprocessingConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            max_dimension: processing::MAX_DIMENSION,
            background: BackgroundConfig {
                enabled: true,
                sensitivity: processing::BACKGROUND_SENSITIVITY,
            },
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            n_colors: clustering::DEFAULT_COLORS,
            foreground_sum_threshold: processing::FOREGROUND_SUM_THRESHOLD,
            min_foreground_pixels: processing::MIN_FOREGROUND_PIXELS,
            runs: clustering::RUNS,
            max_iterations: clustering::MAX_ITERATIONS,
            convergence: clustering::CONVERGENCE,
            seed: clustering::SEED,
        }
    }
}

impl AnalysisConfig {
    /// Set the target number of dominant colors
    pub fn with_n_colors(mut self, n_colors: usize) -> Self {
        self.extraction.n_colors = n_colors;
        self
    }

    /// Enable or disable background suppression
    pub fn with_background(mut self, enabled: bool) -> Self {
        self.preprocessing.background.enabled = enabled;
        self
    }

    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.n_colors == 0 || extraction.n_colors > clustering::MAX_COLORS {
            return Err(AnalysisError::invalid("n_colors", extraction.n_colors));
        }
        if extraction.runs == 0 {
            return Err(AnalysisError::invalid("runs", extraction.runs));
        }
        if extraction.max_iterations == 0 {
            return Err(AnalysisError::invalid("max_iterations", extraction.max_iterations));
        }
        if self.preprocessing.max_dimension == 0 {
            return Err(AnalysisError::invalid("max_dimension", 0));
        }
        let sensitivity = self.preprocessing.background.sensitivity;
        if !(0.0..=1.0).contains(&sensitivity) {
            return Err(AnalysisError::invalid("sensitivity", sensitivity));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
