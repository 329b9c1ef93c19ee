//! Dominant color samples with their derived representations

use serde::{Deserialize, Serialize, Serializer};

use super::conversion::Lab;
use super::ColorConverter;

/// HSV triple (hue in degrees, saturation and value in percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvValues {
    #[serde(serialize_with = "round2")]
    pub hue: f64,
    #[serde(serialize_with = "round2")]
    pub saturation: f64,
    #[serde(serialize_with = "round2")]
    pub value: f64,
}

/// CIE Lab triple under D65
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabValues {
    #[serde(serialize_with = "round2")]
    pub l: f64,
    #[serde(serialize_with = "round2")]
    pub a: f64,
    #[serde(serialize_with = "round2")]
    pub b: f64,
}

impl From<LabValues> for Lab {
    fn from(values: LabValues) -> Self {
        Lab::new(values.l, values.a, values.b)
    }
}

impl From<Lab> for LabValues {
    fn from(lab: Lab) -> Self {
        Self {
            l: lab.l,
            a: lab.a,
            b: lab.b,
        }
    }
}

/// An RGB color plus its hex, HSV and Lab forms.
///
/// Every derived field is a pure function of `rgb`; samples are only built
/// through [`ColorSample::new`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub hex: String,
    pub rgb: [u8; 3],
    pub hsv: HsvValues,
    pub lab: LabValues,
}

impl ColorSample {
    /// Derive all representations of an RGB triple
    pub fn new(rgb: [u8; 3]) -> Self {
        let converter = ColorConverter::new();
        let (hue, saturation, value) = converter.rgb_to_hsv(rgb);
        Self {
            hex: converter.rgb_to_hex(rgb),
            rgb,
            hsv: HsvValues {
                hue,
                saturation,
                value,
            },
            lab: converter.rgb_to_lab(rgb).into(),
        }
    }

    /// Lab value as a `palette` color
    pub fn lab(&self) -> Lab {
        self.lab.into()
    }
}

/// Serialize with two decimals
pub(crate) fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

/// Serialize with three decimals
pub(crate) fn round3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 3))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
