//! Per-color and palette-level verdicts

use serde::{Deserialize, Serialize};

use super::bands::{
    classify_luminosity, classify_saturation, classify_temperature, LuminosityBand,
    SaturationBand, Temperature,
};
use super::season::{Season, SeasonPalette};
use crate::color::sample::round3;
use crate::color::ColorSample;

/// Classification of one dominant color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorVerdict {
    #[serde(flatten)]
    pub sample: ColorSample,
    pub temperature: Temperature,
    pub saturation: SaturationBand,
    pub luminosity: LuminosityBand,
    pub season: Season,
    /// Season match confidence (0.0-1.0)
    #[serde(serialize_with = "round3")]
    pub confidence: f64,
}

impl ColorVerdict {
    /// Run the four classifiers on a sample
    pub fn classify(sample: ColorSample, palette: &SeasonPalette) -> Self {
        let matched = palette.classify(sample.lab());
        Self {
            temperature: classify_temperature(sample.hsv.hue, sample.lab.a),
            saturation: classify_saturation(sample.hsv.saturation),
            luminosity: classify_luminosity(sample.hsv.value),
            season: matched.season,
            confidence: matched.confidence,
            sample,
        }
    }
}

/// Warm/cool tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureCounts {
    pub warm: usize,
    pub cool: usize,
}

/// Saturation band tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaturationCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Luminosity band tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuminosityCounts {
    pub dark: usize,
    pub medium: usize,
    pub light: usize,
}

/// Aggregate verdict for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteVerdict {
    /// Majority season; `None` only when there are no colors
    pub dominant_season: Option<Season>,
    /// Mean of the per-color confidences
    #[serde(serialize_with = "round3")]
    pub overall_confidence: f64,
    pub temperature: TemperatureCounts,
    pub saturation: SaturationCounts,
    pub luminosity: LuminosityCounts,
    /// Per-color verdicts, most frequent color first
    pub colors: Vec<ColorVerdict>,
}

impl PaletteVerdict {
    /// Aggregate per-color verdicts
    ///
    /// The dominant season is the most voted one; ties go to the season
    /// whose first vote comes earliest in `colors` (extraction rank).
    /// Overall confidence is 0 for an empty list.
    pub fn aggregate(colors: Vec<ColorVerdict>) -> Self {
        let mut temperature = TemperatureCounts::default();
        let mut saturation = SaturationCounts::default();
        let mut luminosity = LuminosityCounts::default();
        let mut votes: Vec<(Season, usize)> = Vec::new();

        for verdict in &colors {
            match verdict.temperature {
                Temperature::Warm => temperature.warm += 1,
                Temperature::Cool => temperature.cool += 1,
            }
            match verdict.saturation {
                SaturationBand::Low => saturation.low += 1,
                SaturationBand::Medium => saturation.medium += 1,
                SaturationBand::High => saturation.high += 1,
            }
            match verdict.luminosity {
                LuminosityBand::Dark => luminosity.dark += 1,
                LuminosityBand::Medium => luminosity.medium += 1,
                LuminosityBand::Light => luminosity.light += 1,
            }
            match votes.iter_mut().find(|(season, _)| *season == verdict.season) {
                Some((_, count)) => *count += 1,
                None => votes.push((verdict.season, 1)),
            }
        }

        let mut dominant: Option<(Season, usize)> = None;
        for &(season, count) in &votes {
            if dominant.map_or(true, |(_, best)| count > best) {
                dominant = Some((season, count));
            }
        }

        let overall_confidence = if colors.is_empty() {
            0.0
        } else {
            colors.iter().map(|c| c.confidence).sum::<f64>() / colors.len() as f64
        };

        Self {
            dominant_season: dominant.map(|(season, _)| season),
            overall_confidence,
            temperature,
            saturation,
            luminosity,
            colors,
        }
    }
}
