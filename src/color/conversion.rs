//! Color space conversion utilities
//!
//! Provides the deterministic conversions the classifiers depend on:
//! - RGB (0-255) to HSV (hue 0-360°, saturation/value 0-100%)
//! - RGB to CIE Lab (D65, sRGB companding) and back
//! - Hex color representation
//! - Euclidean Lab distance (ΔE76)
//!
//! All arithmetic is done in `f64`; band boundaries such as 30% saturation
//! must land exactly.

use palette::white_point::D65;
use palette::{FromColor, LinSrgb, Srgb, Xyz};

use crate::constants::d65::{LAB_DELTA, SRGB_TO_XYZ};
use crate::{constants::D65_WHITE_POINT_XYZ, AnalysisError, Result};

/// CIE Lab under D65 in double precision
pub type Lab = palette::Lab<D65, f64>;

/// Color converter for sRGB input under D65
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorConverter {
    white_point: [f64; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Reference white in XYZ (always D65)
    pub fn white_point(&self) -> [f64; 3] {
        self.white_point
    }

    fn srgb(rgb: [u8; 3]) -> Srgb<f64> {
        Srgb::new(rgb[0], rgb[1], rgb[2]).into_format::<f64>()
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// Channels are linearized with the sRGB transfer function (0.04045
    /// breakpoint), mapped to XYZ with the four-decimal sRGB matrix and
    /// normalized by the D65 white before the CIE cube-root / linear
    /// segment split at (6/29)³.
    pub fn rgb_to_lab(&self, rgb: [u8; 3]) -> Lab {
        let linear: LinSrgb<f64> = Self::srgb(rgb).into_linear();
        let (r, g, b) = (linear.red, linear.green, linear.blue);
        let xyz = SRGB_TO_XYZ.map(|row| r * row[0] + g * row[1] + b * row[2]);

        let fx = lab_f(xyz[0] / self.white_point[0]);
        let fy = lab_f(xyz[1] / self.white_point[1]);
        let fz = lab_f(xyz[2] / self.white_point[2]);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Convert Lab back to 8-bit RGB, clamped to the sRGB gamut
    pub fn lab_to_rgb(&self, lab: Lab) -> [u8; 3] {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let xyz = Xyz::<D65, f64>::new(
            lab_f_inv(fx) * self.white_point[0],
            lab_f_inv(fy) * self.white_point[1],
            lab_f_inv(fz) * self.white_point[2],
        );
        let srgb = Srgb::<f64>::from_color(xyz);
        [
            unit_to_byte(srgb.red),
            unit_to_byte(srgb.green),
            unit_to_byte(srgb.blue),
        ]
    }

    /// Convert RGB (0-255) to HSV as `(hue°, saturation%, value%)`
    ///
    /// Hue is in [0, 360); achromatic colors have hue 0.
    pub fn rgb_to_hsv(&self, rgb: [u8; 3]) -> (f64, f64, f64) {
        let srgb = Self::srgb(rgb);
        let (r, g, b) = (srgb.red, srgb.green, srgb.blue);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

        (hue, saturation, max * 100.0)
    }

    /// L* scaled to the 8-bit range (0-255) used by the luminance gate
    pub fn lightness_8bit(&self, rgb: [u8; 3]) -> u8 {
        let lab = self.rgb_to_lab(rgb);
        (lab.l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8
    }

    /// Convert RGB to a lowercase hexadecimal color string (e.g., "#ff0000")
    pub fn rgb_to_hex(&self, rgb: [u8; 3]) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    /// Parse hexadecimal color string to RGB
    ///
    /// Accepts "#RRGGBB" or "RRGGBB" in any case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if the string is not six hex digits
    pub fn hex_to_rgb(&self, hex: &str) -> Result<[u8; 3]> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AnalysisError::invalid("hex", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| AnalysisError::invalid("hex", hex))
        };
        Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
    }

    /// Compute Delta E (color difference) between two Lab colors
    ///
    /// Uses simple Euclidean distance (ΔE76)
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f64 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA.powi(3) {
        t.powf(1.0 / 3.0)
    } else {
        t / (3.0 * LAB_DELTA.powi(2)) + 4.0 / 29.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    if f > LAB_DELTA {
        f.powi(3)
    } else {
        3.0 * LAB_DELTA.powi(2) * (f - 4.0 / 29.0)
    }
}

/// Map a 0.0-1.0 channel to the nearest byte
pub(crate) fn unit_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_converter_creation() {
        let converter = ColorConverter::new();
        assert_eq!(converter.white_point(), D65_WHITE_POINT_XYZ);
    }

    #[test]
    fn test_rgb_to_lab_black() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab([0, 0, 0]);
        assert!(lab.l < 1.0);
    }

    #[test]
    fn test_rgb_to_lab_white() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab([255, 255, 255]);
        assert!(lab.l > 99.0);
        assert!(lab.a.abs() < 1.0);
        assert!(lab.b.abs() < 1.0);
    }

    #[test]
    fn test_rgb_to_lab_reference_values() {
        let converter = ColorConverter::new();

        let red = converter.rgb_to_lab([255, 0, 0]);
        assert!((red.l - 53.24).abs() < 0.1);
        assert!((red.a - 80.09).abs() < 0.2);
        assert!((red.b - 67.20).abs() < 0.2);

        let blue = converter.rgb_to_lab([0, 0, 255]);
        assert!((blue.l - 32.30).abs() < 0.1);
        assert!((blue.a - 79.20).abs() < 0.2);
        assert!((blue.b + 107.86).abs() < 0.2);
    }

    #[test]
    fn test_rgb_to_lab_matches_four_decimal_matrix() {
        let converter = ColorConverter::new();

        let blue = converter.rgb_to_lab([0, 0, 255]);
        assert!((blue.l - 32.30258666724948).abs() < 1e-9);
        assert!((blue.a - 79.19666178930932).abs() < 1e-9);
        assert!((blue.b + 107.86368104495172).abs() < 1e-9);

        // the matrix rows do not sum exactly to the white point
        let white = converter.rgb_to_lab([255, 255, 255]);
        assert!((white.l - 100.0).abs() < 1e-9);
        assert!((white.a - 0.00526049995830391).abs() < 1e-9);
        assert!((white.b + 0.010408184525267927).abs() < 1e-9);
    }

    #[test]
    fn test_lab_roundtrip_sample() {
        let converter = ColorConverter::new();
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let rgb = [r as u8, g as u8, b as u8];
                    let back = converter.lab_to_rgb(converter.rgb_to_lab(rgb));
                    for channel in 0..3 {
                        let diff = (rgb[channel] as i16 - back[channel] as i16).abs();
                        assert!(diff <= 1, "{:?} came back as {:?}", rgb, back);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let converter = ColorConverter::new();

        let (h, s, v) = converter.rgb_to_hsv([255, 0, 0]);
        assert!(h.abs() < 0.01);
        assert!((s - 100.0).abs() < 0.01);
        assert!((v - 100.0).abs() < 0.01);

        let (h, _, _) = converter.rgb_to_hsv([0, 255, 0]);
        assert!((h - 120.0).abs() < 0.01);

        let (h, _, _) = converter.rgb_to_hsv([0, 0, 255]);
        assert!((h - 240.0).abs() < 0.01);
    }

    #[test]
    fn test_rgb_to_hsv_exact_band_boundary() {
        let converter = ColorConverter::new();
        // (90 - 63) / 90 is exactly 30%
        let (h, s, v) = converter.rgb_to_hsv([63, 63, 90]);
        assert_eq!(s, 30.0);
        assert!((h - 240.0).abs() < 1e-9);
        assert!((v - 90.0 / 255.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsv_wraps_negative_hue() {
        let converter = ColorConverter::new();
        let (h, _, _) = converter.rgb_to_hsv([255, 0, 128]);
        assert!(h > 300.0 && h < 360.0);
    }

    #[test]
    fn test_rgb_to_hsv_gray() {
        let converter = ColorConverter::new();
        let (h, s, v) = converter.rgb_to_hsv([128, 128, 128]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 50.196).abs() < 0.01);
    }

    #[test]
    fn test_lightness_8bit_extremes() {
        let converter = ColorConverter::new();
        assert_eq!(converter.lightness_8bit([0, 0, 0]), 0);
        assert_eq!(converter.lightness_8bit([255, 255, 255]), 255);
    }

    #[test]
    fn test_rgb_to_hex() {
        let converter = ColorConverter::new();
        assert_eq!(converter.rgb_to_hex([255, 0, 0]), "#ff0000");
        assert_eq!(converter.rgb_to_hex([0, 171, 205]), "#00abcd");
    }

    #[test]
    fn test_hex_to_rgb() {
        let converter = ColorConverter::new();
        assert_eq!(converter.hex_to_rgb("#FF0000").unwrap(), [255, 0, 0]);
        assert_eq!(converter.hex_to_rgb("00ff00").unwrap(), [0, 255, 0]);
    }

    #[test]
    fn test_hex_roundtrip_sample() {
        let converter = ColorConverter::new();
        for value in (0u32..0x1000000).step_by(4099) {
            let rgb = [(value >> 16) as u8, (value >> 8) as u8, value as u8];
            let hex = converter.rgb_to_hex(rgb);
            assert_eq!(converter.hex_to_rgb(&hex).unwrap(), rgb);
        }
        let white = converter.rgb_to_hex([255, 255, 255]);
        assert_eq!(converter.hex_to_rgb(&white).unwrap(), [255, 255, 255]);
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        let converter = ColorConverter::new();
        assert!(converter.hex_to_rgb("#FF").is_err());
        assert!(converter.hex_to_rgb("#GGGGGG").is_err());
        assert!(converter.hex_to_rgb("#ééé").is_err());
    }

    #[test]
    fn test_delta_e_same_color() {
        let converter = ColorConverter::new();
        let lab = Lab::new(50.0, 0.0, 0.0);
        assert!(converter.delta_e(lab, lab) < 0.001);
    }

    #[test]
    fn test_delta_e_different_colors() {
        let converter = ColorConverter::new();
        let lab1 = Lab::new(50.0, 0.0, 0.0);
        let lab2 = Lab::new(60.0, 10.0, 10.0);
        assert!((converter.delta_e(lab1, lab2) - 17.3205).abs() < 0.001);
    }
}
