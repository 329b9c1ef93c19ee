//! Dominant color extraction
//!
//! Finds the most frequent colors of a background-suppressed image with:
//! - Foreground selection (near-white pixels dropped, whole-image fallback)
//! - Seeded multi-start k-means in sRGB space, lowest inertia retained
//! - Ordering by cluster membership, most frequent first

use std::collections::HashSet;

use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;
use tracing::{debug, warn};

use crate::color::conversion::unit_to_byte;
use crate::config::ExtractionConfig;
use crate::constants::clustering;
use crate::image_loader::PixelBuffer;
use crate::{AnalysisError, Result};

/// Palette extractor implementing seeded k-means clustering
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    foreground_sum_threshold: u32,
    min_foreground_pixels: usize,
    runs: usize,
    max_iterations: usize,
    convergence: f32,
    seed: u64,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl PaletteExtractor {
    /// Create an extractor from configuration
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            foreground_sum_threshold: config.foreground_sum_threshold,
            min_foreground_pixels: config.min_foreground_pixels,
            runs: config.runs.max(1),
            max_iterations: config.max_iterations.max(1),
            convergence: config.convergence,
            seed: config.seed,
        }
    }

    /// Keep the pixels that are not suppressed background
    ///
    /// A pixel is foreground when its channel sum is below the threshold
    /// (750 by default). If fewer than the minimum survive, every pixel of
    /// the buffer is returned instead so degenerate images still produce a
    /// palette.
    pub fn select_foreground_pixels(&self, buffer: &PixelBuffer) -> Vec<[u8; 3]> {
        let foreground: Vec<[u8; 3]> = buffer
            .pixels()
            .map(|p| p.0)
            .filter(|rgb| channel_sum(rgb) < self.foreground_sum_threshold)
            .collect();

        if foreground.len() < self.min_foreground_pixels {
            warn!(
                foreground = foreground.len(),
                minimum = self.min_foreground_pixels,
                "too few foreground pixels, clustering the whole image"
            );
            return buffer.pixels().map(|p| p.0).collect();
        }

        debug!(
            foreground = foreground.len(),
            total = buffer.width() as usize * buffer.height() as usize,
            "selected foreground pixels"
        );
        foreground
    }

    /// Cluster pixels and return the centroid colors, most frequent first
    ///
    /// `k = max(1, min(n_colors, distinct colors))`. Each of the configured
    /// runs uses seed `seed + run`; the run with the lowest inertia (sum of
    /// squared distances to the assigned centroid) is kept. Clusters left
    /// without members are dropped. Equal membership keeps centroid order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if `n_colors` is 0 or above 255, or if
    /// `pixels` is empty.
    pub fn extract_dominant_colors(&self, pixels: &[[u8; 3]], n_colors: usize) -> Result<Vec<[u8; 3]>> {
        if n_colors == 0 || n_colors > clustering::MAX_COLORS {
            return Err(AnalysisError::invalid("n_colors", n_colors));
        }
        if pixels.is_empty() {
            return Err(AnalysisError::invalid("pixels", "empty pixel set"));
        }

        let distinct = pixels.iter().collect::<HashSet<_>>().len();
        let k = n_colors.min(distinct).max(1);
        debug!(n_colors, distinct, k, pixels = pixels.len(), "clustering pixels");

        let samples: Vec<Srgb> = pixels
            .iter()
            .map(|&[r, g, b]| Srgb::new(r, g, b).into_format::<f32>())
            .collect();

        let best = self.best_run(&samples, k);
        Ok(rank_by_membership(&best))
    }

    fn best_run(&self, samples: &[Srgb], k: usize) -> Kmeans<Srgb> {
        let mut best: Option<(f64, Kmeans<Srgb>)> = None;

        for run in 0..self.runs {
            let seed = self.seed.wrapping_add(run as u64);
            let result = get_kmeans(k, self.max_iterations, self.convergence, false, samples, seed);
            let score = inertia(samples, &result);
            debug!(run, seed, inertia = score, "k-means run finished");

            let better = match &best {
                Some((best_score, _)) => score < *best_score,
                None => true,
            };
            if better {
                best = Some((score, result));
            }
        }

        match best {
            Some((_, result)) => result,
            // runs is at least 1
            None => get_kmeans(k, self.max_iterations, self.convergence, false, samples, self.seed),
        }
    }
}

fn channel_sum(rgb: &[u8; 3]) -> u32 {
    rgb.iter().map(|&c| c as u32).sum()
}

/// Sum of squared sRGB distances from each sample to its centroid
fn inertia(samples: &[Srgb], result: &Kmeans<Srgb>) -> f64 {
    samples
        .iter()
        .zip(&result.indices)
        .map(|(sample, &index)| {
            let centroid = &result.centroids[index as usize];
            let dr = (sample.red - centroid.red) as f64;
            let dg = (sample.green - centroid.green) as f64;
            let db = (sample.blue - centroid.blue) as f64;
            dr * dr + dg * dg + db * db
        })
        .sum()
}

fn rank_by_membership(result: &Kmeans<Srgb>) -> Vec<[u8; 3]> {
    let mut counts = vec![0usize; result.centroids.len()];
    for &index in &result.indices {
        counts[index as usize] += 1;
    }

    let mut ranked: Vec<(usize, usize)> = counts
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .collect();
    // stable: ties keep centroid order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .map(|(index, _)| {
            let centroid = result.centroids[index];
            [
                unit_to_byte(centroid.red as f64),
                unit_to_byte(centroid.green as f64),
                unit_to_byte(centroid.blue as f64),
            ]
        })
        .collect()
}
