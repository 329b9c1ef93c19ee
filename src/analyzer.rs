//! Palette analysis pipeline
//!
//! [`ColorimetryAnalyzer`] owns one configuration and runs
//! decode → resize → background suppression → extraction → classification →
//! aggregation. It holds no per-call state, so a single analyzer can serve
//! concurrent callers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::classification::{ColorVerdict, PaletteVerdict, SeasonPalette};
use crate::color::{ColorConverter, ColorSample, PaletteExtractor};
use crate::config::AnalysisConfig;
use crate::image_loader::{self, ImageInput, PixelBuffer};
use crate::preprocessing::{resize_bound, BackgroundSuppressor, LuminanceGate};
use crate::{AnalysisError, Result};

/// Intermediate images kept for inspection
#[derive(Debug, Clone)]
pub struct DebugOutput {
    /// Decoded image after downsampling
    pub resized_image: PixelBuffer,
    /// Image after background suppression, when enabled
    pub suppressed_image: Option<PixelBuffer>,
}

/// Outcome of an analysis that never fails
///
/// Serializes either as the [`PaletteVerdict`] itself or as
/// `{"error": ..., "error_type": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Success(PaletteVerdict),
    Failure { error: String, error_type: String },
}

impl From<Result<PaletteVerdict>> for AnalysisReport {
    fn from(result: Result<PaletteVerdict>) -> Self {
        match result {
            Ok(verdict) => AnalysisReport::Success(verdict),
            Err(error) => AnalysisReport::Failure {
                error: error.to_string(),
                error_type: error.kind().to_string(),
            },
        }
    }
}

/// Palette analyzer combining preprocessing, extraction and classification
pub struct ColorimetryAnalyzer {
    config: AnalysisConfig,
    extractor: PaletteExtractor,
    suppressor: Box<dyn BackgroundSuppressor>,
    palette: &'static SeasonPalette,
}

impl ColorimetryAnalyzer {
    /// Create an analyzer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if the configuration is out of range
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let gate = LuminanceGate::new(config.preprocessing.background.sensitivity)?;
        Ok(Self {
            extractor: PaletteExtractor::new(&config.extraction),
            suppressor: Box::new(gate),
            palette: SeasonPalette::global(),
            config,
        })
    }

    /// Replace the background suppression strategy
    pub fn with_suppressor(mut self, suppressor: impl BackgroundSuppressor + 'static) -> Self {
        self.suppressor = Box::new(suppressor);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an image and return its palette verdict
    ///
    /// # Errors
    ///
    /// - `UnsupportedInputError` if the input cannot be resolved to bytes
    /// - `DecodeError` if the bytes are not an image
    /// - `InvalidInputError` for degenerate pixel sets
    #[instrument(skip_all, fields(n_colors = self.config.extraction.n_colors))]
    pub fn analyze(&self, input: impl Into<ImageInput>) -> Result<PaletteVerdict> {
        let bytes = input.into().into_bytes()?;
        let resized = self.load(&bytes)?;
        let processed = self.suppress_background(resized);
        self.classify_buffer(&processed)
    }

    /// Analyze an image and also return the intermediate images
    #[instrument(skip_all, fields(n_colors = self.config.extraction.n_colors))]
    pub fn analyze_debug(&self, input: impl Into<ImageInput>) -> Result<(PaletteVerdict, DebugOutput)> {
        let bytes = input.into().into_bytes()?;
        let resized = self.load(&bytes)?;
        let processed = self.suppress_background(resized.clone());
        let verdict = self.classify_buffer(&processed)?;

        let suppressed_image = self.config.preprocessing.background.enabled.then_some(processed);
        Ok((
            verdict,
            DebugOutput {
                resized_image: resized,
                suppressed_image,
            },
        ))
    }

    /// Analyze an image, folding any failure into the report
    pub fn analyze_report(&self, input: impl Into<ImageInput>) -> AnalysisReport {
        self.analyze(input).into()
    }

    /// Classify a single `#RRGGBB` color
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` unless the string is `#` followed by six
    /// hex digits
    pub fn analyze_color(&self, hex: &str) -> Result<ColorVerdict> {
        if !hex.starts_with('#') {
            return Err(AnalysisError::invalid("hex", hex));
        }
        let rgb = ColorConverter::new().hex_to_rgb(hex)?;
        Ok(ColorVerdict::classify(ColorSample::new(rgb), self.palette))
    }

    /// Decode and downsample
    fn load(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let decoded = image_loader::decode(bytes)?;
        Ok(resize_bound(decoded, self.config.preprocessing.max_dimension))
    }

    fn suppress_background(&self, buffer: PixelBuffer) -> PixelBuffer {
        if self.config.preprocessing.background.enabled {
            self.suppressor.suppress(buffer)
        } else {
            buffer
        }
    }

    fn classify_buffer(&self, buffer: &PixelBuffer) -> Result<PaletteVerdict> {
        let pixels = self.extractor.select_foreground_pixels(buffer);
        let dominant = self
            .extractor
            .extract_dominant_colors(&pixels, self.config.extraction.n_colors)?;
        debug!(colors = dominant.len(), "extracted dominant colors");

        let verdicts = dominant
            .into_iter()
            .map(|rgb| ColorVerdict::classify(ColorSample::new(rgb), self.palette))
            .collect();
        let verdict = PaletteVerdict::aggregate(verdicts);

        info!(
            dominant_season = ?verdict.dominant_season,
            confidence = verdict.overall_confidence,
            colors = verdict.colors.len(),
            "palette analysis complete"
        );
        Ok(verdict)
    }
}

impl Default for ColorimetryAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            extractor: PaletteExtractor::default(),
            suppressor: Box::new(LuminanceGate::default()),
            palette: SeasonPalette::global(),
        }
    }
}
