//! Classify the skin tone in a photo using precomputed landmarks
//!
//! The crate does not ship a face detector, so this demo replays a landmark
//! set exported from one: a JSON array of `{ "x": .., "y": .. }` points in
//! normalized image coordinates. An empty array behaves like "no face".
//! Prints the outcome as JSON on stdout.

use std::{env, fs, path::Path, process};
use vesto_core::image_loader::{is_supported_extension, supported_extensions};
use vesto_core::{
    analyze_face, FaceLandmarks, Landmark, PipelineConfig, ScanOutcome, StaticLandmarker,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <image> <landmarks.json> [config.json]", args[0]);
        process::exit(1);
    }

    let image_path = Path::new(&args[1]);
    let extension = image_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if !is_supported_extension(extension) {
        eprintln!("Unsupported image type {:?}", extension);
        eprintln!("Supported: {}", supported_extensions().join(", "));
        process::exit(1);
    }
    let config = match args.get(3) {
        Some(path) => match PipelineConfig::from_json_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    let points: Vec<Landmark> = match fs::read_to_string(&args[2])
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
    {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error reading landmarks: {}", e);
            process::exit(1);
        }
    };

    let detector = if points.is_empty() {
        StaticLandmarker::NoFace
    } else {
        StaticLandmarker::Face(FaceLandmarks::new(points))
    };

    match analyze_face(image_path, &detector, &config) {
        Ok(outcome) => {
            if let ScanOutcome::Classified(result) = &outcome {
                eprintln!(
                    "Tone {} ({}), ΔE {:.2}",
                    result.tone_id, result.band, result.delta_e
                );
            } else {
                eprintln!("No face found, try another photo");
            }
            match serde_json::to_string_pretty(&outcome) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error serializing result: {}", e),
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            eprintln!("  {}", e);
            process::exit(1);
        }
    }
}
