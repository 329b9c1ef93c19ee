//! Seasonal palette matching
//!
//! Each season owns a handful of reference swatches. A color belongs to the
//! season holding the swatch nearest to it in Lab, and its confidence falls
//! linearly with that distance.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::color::{ColorConverter, Lab};
use crate::constants::season::CONFIDENCE_DISTANCE_SCALE;

/// Seasonal color category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons in tie-break order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Representative swatches per season, in `Season::ALL` order
const REFERENCE_SWATCHES: [(Season, [[u8; 3]; 5]); 4] = [
    (
        Season::Spring,
        [[255, 182, 193], [144, 238, 144], [255, 218, 185], [173, 255, 47], [255, 240, 245]],
    ),
    (
        Season::Summer,
        [[0, 191, 255], [0, 255, 255], [255, 255, 0], [144, 238, 144], [255, 105, 180]],
    ),
    (
        Season::Autumn,
        [[184, 92, 23], [255, 140, 0], [210, 105, 30], [189, 183, 107], [205, 92, 92]],
    ),
    (
        Season::Winter,
        [[0, 0, 0], [255, 0, 0], [0, 0, 255], [255, 255, 255], [192, 192, 192]],
    ),
];

/// One reference swatch with its precomputed Lab value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub rgb: [u8; 3],
    pub lab: Lab,
}

/// Best season for a color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonMatch {
    pub season: Season,
    /// Lab distance to the nearest swatch of `season`
    pub distance: f64,
    /// `max(0, 1 - distance / 100)`
    pub confidence: f64,
}

/// Read-only reference palette for the four seasons
#[derive(Debug, Clone)]
pub struct SeasonPalette {
    seasons: Vec<(Season, Vec<Swatch>)>,
    converter: ColorConverter,
}

static SEASON_PALETTE: OnceLock<SeasonPalette> = OnceLock::new();

impl SeasonPalette {
    /// Process-wide palette, built on first use
    pub fn global() -> &'static SeasonPalette {
        SEASON_PALETTE.get_or_init(SeasonPalette::reference)
    }

    fn reference() -> Self {
        let converter = ColorConverter::new();
        let seasons = REFERENCE_SWATCHES
            .iter()
            .map(|(season, swatches)| {
                let swatches = swatches
                    .iter()
                    .map(|&rgb| Swatch {
                        rgb,
                        lab: converter.rgb_to_lab(rgb),
                    })
                    .collect();
                (*season, swatches)
            })
            .collect();
        Self { seasons, converter }
    }

    /// Reference swatches of one season
    pub fn swatches(&self, season: Season) -> &[Swatch] {
        self.seasons
            .iter()
            .find(|(s, _)| *s == season)
            .map(|(_, swatches)| swatches.as_slice())
            .unwrap_or(&[])
    }

    /// Smallest Lab distance from `lab` to any swatch of `season`
    pub fn min_distance(&self, season: Season, lab: Lab) -> f64 {
        self.swatches(season)
            .iter()
            .map(|swatch| self.converter.delta_e(lab, swatch.lab))
            .fold(f64::INFINITY, f64::min)
    }

    /// Match a Lab color to its nearest season
    ///
    /// Equal distances resolve to the season listed first in [`Season::ALL`]
    /// (Spring, Summer, Autumn, Winter).
    pub fn classify(&self, lab: Lab) -> SeasonMatch {
        let mut best = SeasonMatch {
            season: Season::ALL[0],
            distance: f64::INFINITY,
            confidence: 0.0,
        };

        for season in Season::ALL {
            let distance = self.min_distance(season, lab);
            if distance < best.distance {
                best.season = season;
                best.distance = distance;
            }
        }

        best.confidence = (1.0 - best.distance / CONFIDENCE_DISTANCE_SCALE).max(0.0);
        best
    }
}
