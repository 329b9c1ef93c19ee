//! Integration tests for the complete analyze pipeline
//!
//! These tests validate the end-to-end palette analysis workflow including:
//! - Input resolution (bytes, paths, base64, JSON values)
//! - Decoding, downsampling and background suppression
//! - Dominant color extraction and classification
//! - Error handling for edge cases
//!
//! Test images are generated in memory, so no assets are required.

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, Rgb, RgbImage};
use season_colors::{
    analyze, analyze_color, analyze_debug, analyze_json, AnalysisConfig, AnalysisError,
    AnalysisReport, ColorimetryAnalyzer, ImageInput, LuminosityBand, SaturationBand, Season,
};
use serde_json::json;
use std::io::Cursor;

// ============================================================================
// Helpers
// ============================================================================

fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_png(&RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// 80% pure blue, 20% blue jittered by up to 20 per channel
///
/// The jitter stays near the swatch; uniformly random noise can pull
/// clusters toward other seasons.
fn jittered_blue_png() -> Vec<u8> {
    let image = RgbImage::from_fn(60, 50, |x, y| {
        let i = y * 60 + x;
        if i % 5 == 0 {
            Rgb([
                ((i * 7) % 21) as u8,
                ((i * 13) % 21) as u8,
                235 + ((i * 3) % 21) as u8,
            ])
        } else {
            Rgb([0, 0, 255])
        }
    });
    encode_png(&image)
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_undecodable_bytes() {
    let err = analyze(b"not an image", 5, true).unwrap_err();
    match err {
        AnalysisError::DecodeError { .. } => {}
        _ => panic!("Expected DecodeError, got: {:?}", err),
    }
}

#[test]
fn test_base64_of_non_image() {
    let text = general_purpose::STANDARD.encode(b"hello, world");
    let err = analyze(text, 5, true).unwrap_err();
    assert_eq!(err.kind(), "DecodeError");
}

#[test]
fn test_garbage_string_is_unsupported() {
    let err = analyze("definitely not an image!!", 5, true).unwrap_err();
    match err {
        AnalysisError::UnsupportedInputError { .. } => {}
        _ => panic!("Expected UnsupportedInputError, got: {:?}", err),
    }
}

#[test]
fn test_empty_string_is_unsupported() {
    let err = analyze("", 5, true).unwrap_err();
    assert_eq!(err.kind(), "UnsupportedInputError");
}

#[test]
fn test_json_number_is_unsupported() {
    let err = ImageInput::try_from(json!(42)).unwrap_err();
    assert_eq!(err.kind(), "UnsupportedInputError");

    let report = serde_json::to_value(analyze_json(json!({"path": "x.png"}), 5, true)).unwrap();
    assert_eq!(report["error_type"], "UnsupportedInputError");
}

#[test]
fn test_invalid_color_counts() {
    let bytes = solid_png(10, 10, [100, 50, 50]);
    for n_colors in [0, 256] {
        let err = analyze(bytes.clone(), n_colors, true).unwrap_err();
        match err {
            AnalysisError::InvalidInputError { ref parameter, .. } => {
                assert_eq!(parameter, "n_colors")
            }
            _ => panic!("Expected InvalidInputError, got: {:?}", err),
        }
    }
}

#[test]
fn test_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");
    let err = analyze(missing.as_path(), 5, true).unwrap_err();
    assert_eq!(err.kind(), "UnsupportedInputError");
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_solid_color_single_cluster() {
    let verdict = analyze(solid_png(120, 80, [184, 92, 23]), 5, true).unwrap();

    assert_eq!(verdict.colors.len(), 1);
    let color = &verdict.colors[0];
    assert_eq!(color.sample.hex, "#b85c17");
    assert_eq!(color.season, Season::Autumn);
    assert!(color.confidence > 0.999);
    assert_eq!(verdict.dominant_season, Some(Season::Autumn));
    assert_eq!(verdict.temperature.warm, 1);
}

#[test]
fn test_near_white_image_falls_back_to_all_pixels() {
    // every pixel is gated to white, so no foreground survives
    let verdict = analyze(solid_png(50, 50, [250, 250, 250]), 5, true).unwrap();

    assert_eq!(verdict.colors.len(), 1);
    let color = &verdict.colors[0];
    assert_eq!(color.sample.rgb, [255, 255, 255]);
    assert_eq!(color.season, Season::Winter);
    assert_eq!(color.saturation, SaturationBand::Low);
    assert_eq!(color.luminosity, LuminosityBand::Light);
    assert_eq!(verdict.dominant_season, Some(Season::Winter));
}

#[test]
fn test_near_white_image_without_suppression() {
    let verdict = analyze(solid_png(50, 50, [250, 250, 250]), 5, false).unwrap();
    assert_eq!(verdict.colors[0].sample.rgb, [250, 250, 250]);
}

#[test]
fn test_jittered_winter_swatch() {
    let verdict = analyze(jittered_blue_png(), 5, true).unwrap();

    assert_eq!(verdict.dominant_season, Some(Season::Winter));
    assert!(verdict.overall_confidence > 0.5);
    assert!(!verdict.colors.is_empty());
    assert!(verdict.colors.len() <= 5);
    assert!(verdict.colors[0].sample.rgb[2] >= 235);
    assert!(verdict
        .colors
        .iter()
        .all(|color| color.season == Season::Winter));
}

#[test]
fn test_counts_sum_to_color_count() {
    let verdict = analyze(jittered_blue_png(), 3, true).unwrap();
    let n = verdict.colors.len();

    assert_eq!(verdict.temperature.warm + verdict.temperature.cool, n);
    assert_eq!(
        verdict.saturation.low + verdict.saturation.medium + verdict.saturation.high,
        n
    );
    assert_eq!(
        verdict.luminosity.dark + verdict.luminosity.medium + verdict.luminosity.light,
        n
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let bytes = jittered_blue_png();
    let first = analyze(bytes.clone(), 5, true).unwrap();
    let second = analyze(bytes, 5, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_debug_output_dimensions() {
    let bytes = solid_png(2000, 1000, [120, 80, 60]);
    let (verdict, debug) = analyze_debug(bytes.clone(), 5, true).unwrap();
    assert_eq!(debug.resized_image.dimensions(), (800, 400));
    assert!(debug.suppressed_image.is_some());
    assert_eq!(verdict.colors.len(), 1);

    let (_, debug) = analyze_debug(bytes, 5, false).unwrap();
    assert!(debug.suppressed_image.is_none());
}

#[test]
fn test_small_image_is_not_upscaled() {
    let (_, debug) = analyze_debug(solid_png(30, 20, [120, 80, 60]), 5, true).unwrap();
    assert_eq!(debug.resized_image.dimensions(), (30, 20));
}

// ============================================================================
// Input Resolution Tests
// ============================================================================

#[test]
fn test_path_and_path_string_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swatch.png");
    std::fs::write(&path, solid_png(40, 40, [0, 0, 255])).unwrap();

    let from_path = analyze(path.as_path(), 5, true).unwrap();
    let from_text = analyze(path.to_string_lossy().into_owned(), 5, true).unwrap();

    assert_eq!(from_path, from_text);
    assert_eq!(from_path.dominant_season, Some(Season::Winter));
}

#[test]
fn test_base64_and_data_url_inputs() {
    let bytes = solid_png(40, 40, [184, 92, 23]);
    let encoded = general_purpose::STANDARD.encode(&bytes);

    let from_bytes = analyze(bytes, 5, true).unwrap();
    let from_base64 = analyze(encoded.clone(), 5, true).unwrap();
    let from_data_url = analyze(format!("data:image/png;base64,{}", encoded), 5, true).unwrap();

    assert_eq!(from_bytes, from_base64);
    assert_eq!(from_bytes, from_data_url);
}

// ============================================================================
// Output Shape Tests
// ============================================================================

#[test]
fn test_json_output_shape() {
    let encoded = general_purpose::STANDARD.encode(solid_png(40, 40, [0, 0, 255]));
    let report = analyze_json(json!(encoded), 5, true);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["dominant_season"], "Winter");
    assert!(value["overall_confidence"].is_number());
    for key in ["warm", "cool"] {
        assert!(value["temperature"][key].is_u64());
    }
    for key in ["low", "medium", "high"] {
        assert!(value["saturation"][key].is_u64());
    }
    for key in ["dark", "medium", "light"] {
        assert!(value["luminosity"][key].is_u64());
    }

    let color = &value["colors"][0];
    assert_eq!(color["hex"], "#0000ff");
    assert_eq!(color["rgb"], json!([0, 0, 255]));
    assert_eq!(color["season"], "Winter");
    assert_eq!(color["temperature"], "cool");

    let hue = color["hsv"]["hue"].as_f64().unwrap();
    assert!((hue - 240.0).abs() < 1e-3);
    let l = color["lab"]["l"].as_f64().unwrap();
    assert!(((l * 100.0).round() - l * 100.0).abs() < 1e-6);
}

#[test]
fn test_failure_report_shape() {
    let report = analyze_json(json!(null), 5, true);
    match &report {
        AnalysisReport::Failure { error, error_type } => {
            assert_eq!(error_type, "UnsupportedInputError");
            assert!(!error.is_empty());
        }
        other => panic!("Expected failure report, got: {:?}", other),
    }
}

#[test]
fn test_single_color_analysis() {
    let verdict = analyze_color("#FFFFFF").unwrap();
    assert_eq!(verdict.season, Season::Winter);
    assert_eq!(verdict.sample.hex, "#ffffff");

    assert!(analyze_color("#12345").is_err());
    assert!(analyze_color("123456").is_err());
    assert!(analyze_color("#GGGGGG").is_err());
}

#[test]
fn test_single_color_on_saturation_boundary() {
    let verdict = analyze_color("#3f3f5a").unwrap();
    assert_eq!(verdict.sample.hsv.saturation, 30.0);
    assert_eq!(verdict.saturation, SaturationBand::Medium);
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_file_drives_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    AnalysisConfig::default()
        .with_n_colors(2)
        .to_json_file(&path)
        .unwrap();

    let config = AnalysisConfig::from_json_file(&path).unwrap();
    let analyzer = ColorimetryAnalyzer::new(config).unwrap();
    let verdict = analyzer.analyze(jittered_blue_png()).unwrap();
    assert!(verdict.colors.len() <= 2);
}

#[test]
fn test_analyzer_shared_across_threads() {
    let analyzer = ColorimetryAnalyzer::default();
    let bytes = jittered_blue_png();
    let expected = analyzer.analyze(bytes.clone()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| analyzer.analyze(bytes.clone()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
