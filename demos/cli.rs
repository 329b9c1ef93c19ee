//! Command-line interface for season_colors
//!
//! Basic CLI tool for trying palette analysis on image files

use season_colors::{AnalysisConfig, ColorVerdict, ColorimetryAnalyzer, DebugOutput, PaletteVerdict};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut debug_output_dir = None;
    let mut config_path = None;
    let mut hex_color = None;
    let mut n_colors = None;
    let mut keep_background = false;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => {
                // Optional directory argument, unless the next arg is the image itself
                match args.get(i + 1) {
                    Some(next) if !next.starts_with("--") && !is_image_path(next) => {
                        debug_output_dir = Some(PathBuf::from(next));
                        i += 1;
                    }
                    _ => debug_output_dir = Some(PathBuf::from("debug")),
                }
            }
            "--colors" | "-n" => {
                let value = args.get(i + 1).and_then(|v| v.parse::<usize>().ok());
                match value {
                    Some(n) => n_colors = Some(n),
                    None => {
                        eprintln!("Error: --colors expects a positive integer");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                match args.get(i + 1) {
                    Some(path) => config_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("Error: --config expects a file path");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--hex" => {
                match args.get(i + 1) {
                    Some(hex) => hex_color = Some(hex.clone()),
                    None => {
                        eprintln!("Error: --hex expects a color such as #1f3a93");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--keep-background" => keep_background = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_json_file(&path).unwrap_or_else(|error| fail(error)),
        None => AnalysisConfig::default(),
    };
    if let Some(n) = n_colors {
        config = config.with_n_colors(n);
    }
    if keep_background {
        config = config.with_background(false);
    }

    let analyzer = ColorimetryAnalyzer::new(config).unwrap_or_else(|error| fail(error));

    if let Some(hex) = hex_color {
        match analyzer.analyze_color(&hex) {
            Ok(verdict) => print_color(&verdict),
            Err(error) => fail(error),
        }
        return;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    match debug_output_dir {
        Some(output_dir) => match analyzer.analyze_debug(image_path) {
            Ok((verdict, debug_output)) => {
                print_verdict(&verdict);
                save_debug_output(&debug_output, &output_dir, image_path);
            }
            Err(error) => fail(error),
        },
        None => match analyzer.analyze(image_path) {
            Ok(verdict) => print_verdict(&verdict),
            Err(error) => fail(error),
        },
    }
}

fn is_image_path(arg: &str) -> bool {
    let lower = arg.to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".webp", ".gif", ".bmp", ".tif", ".tiff"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

fn fail(error: season_colors::AnalysisError) -> ! {
    eprintln!("Analysis failed: {}", error);
    eprintln!("Suggestion: {}", error.user_message());
    process::exit(1);
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!("       {} --hex <#RRGGBB>", program_name);
    eprintln!();
    eprintln!("Classify the dominant colors of an image into seasonal palettes.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --colors, -n N     Number of dominant colors to extract (default: 5)");
    eprintln!("  --keep-background  Skip background suppression");
    eprintln!("  --config FILE      Load analysis settings from a JSON file");
    eprintln!("  --hex #RRGGBB      Classify a single color instead of an image");
    eprintln!("  --debug [DIR]      Save debug images (resized, background suppressed)");
    eprintln!("                     Optional: specify output directory (default: debug/)");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for pipeline logs on stderr.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} portrait.jpg", program_name);
    eprintln!("  {} --colors 8 --debug out/ portrait.png", program_name);
    eprintln!("  {} --hex '#b85c17'", program_name);
}

fn save_debug_output(debug: &DebugOutput, output_dir: &Path, input_path: &Path) {
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!("Warning: Failed to create output directory: {}", e);
        return;
    }

    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let resized_path = output_dir.join(format!("{}_resized.png", base_name));
    match debug.resized_image.save(&resized_path) {
        Ok(()) => eprintln!("Debug: Saved resized image to {}", resized_path.display()),
        Err(e) => eprintln!("Warning: Failed to save resized image: {}", e),
    }

    if let Some(suppressed) = &debug.suppressed_image {
        let suppressed_path = output_dir.join(format!("{}_suppressed.png", base_name));
        match suppressed.save(&suppressed_path) {
            Ok(()) => eprintln!("Debug: Saved suppressed image to {}", suppressed_path.display()),
            Err(e) => eprintln!("Warning: Failed to save suppressed image: {}", e),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }
}

fn print_color(verdict: &ColorVerdict) {
    print_json(verdict);

    eprintln!();
    eprintln!("Color Summary:");
    eprintln!("  Hex Color: {}", verdict.sample.hex);
    eprintln!(
        "  HSV Values: H={:.1}, S={:.1}%, V={:.1}%",
        verdict.sample.hsv.hue, verdict.sample.hsv.saturation, verdict.sample.hsv.value
    );
    eprintln!(
        "  Lab Values: L*={:.1}, a*={:.1}, b*={:.1}",
        verdict.sample.lab.l, verdict.sample.lab.a, verdict.sample.lab.b
    );
    eprintln!("  Season: {} ({:.1}%)", verdict.season, verdict.confidence * 100.0);
}

fn print_verdict(verdict: &PaletteVerdict) {
    // JSON to stdout for programmatic use
    print_json(verdict);

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("Palette Analysis Summary:");
    match verdict.dominant_season {
        Some(season) => eprintln!("  Dominant Season: {}", season),
        None => eprintln!("  Dominant Season: none"),
    }
    eprintln!("  Confidence: {:.1}%", verdict.overall_confidence * 100.0);
    eprintln!(
        "  Temperature: {} warm, {} cool",
        verdict.temperature.warm, verdict.temperature.cool
    );
    for color in &verdict.colors {
        eprintln!(
            "  {}  {:<6} {:<5} {:<6} {:<6}",
            color.sample.hex,
            color.season.name(),
            format!("{:?}", color.temperature).to_lowercase(),
            format!("{:?}", color.saturation).to_lowercase(),
            format!("{:?}", color.luminosity).to_lowercase(),
        );
    }

    if verdict.overall_confidence < 0.5 {
        eprintln!("  Warning: Low confidence result. Colors are far from every seasonal palette.");
    }
}
