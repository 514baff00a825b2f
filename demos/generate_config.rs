//! Generate the default pipeline configuration file
//!
//! Writes a JSON config with the default sampling, brightness, palette and
//! rule settings, ready to be edited and passed to the `classify` demo.

use std::{env, path::Path, process};
use vesto_core::PipelineConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/pipeline.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = PipelineConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Sampling: landmarks {:?}, {}x{} window",
                config.sampling.landmark_indices,
                config.sampling.window_size,
                config.sampling.window_size
            );
            eprintln!(
                "  Brightness: v < {:.2} -> {:.2}, v > {:.2} -> {:.2}",
                config.brightness.dark_threshold,
                config.brightness.dark_target,
                config.brightness.bright_threshold,
                config.brightness.bright_target
            );
            eprintln!("  Palette: {} tones", config.palette.len());
            eprintln!(
                "  Rules: {} styles, {} target styles without their own rule",
                config.rules.len(),
                config.rules.gaps().len()
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
