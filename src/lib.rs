//! # Vesto Core
//!
//! A Rust crate for classifying facial skin tone from photographs and
//! recommending outfits that go together.
//!
//! The skin-tone pipeline provides reproducible classification by:
//! - Sampling skin at configured facial landmarks with small averaging windows
//! - Pulling under- and over-exposed samples toward a usable brightness band
//! - Converting to CIELAB and picking the nearest of six reference tones by Delta E
//!
//! The outfit engine filters a garment catalog with curated category/style
//! pairings and a color-family rule.
//!
//! Face detection itself is external: plug a detector in through
//! [`FaceLandmarker`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use vesto_core::{analyze_face, PipelineConfig, ScanOutcome, StaticLandmarker};
//! use std::path::Path;
//!
//! let detector = StaticLandmarker::NoFace;
//! let outcome = analyze_face(Path::new("selfie.jpg"), &detector, &PipelineConfig::default())?;
//! match outcome {
//!     ScanOutcome::Classified(result) => println!("Tone {} ({})", result.tone_id, result.band),
//!     ScanOutcome::NoFaceFound => println!("No face found, try another photo"),
//! }
//! # Ok::<(), vesto_core::AnalysisError>(())
//! ```

pub mod calibration;
pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;
pub mod outfit;
pub mod pipeline;
pub mod sampling;
pub mod tone;

pub use config::PipelineConfig;
pub use detection::{FaceLandmarker, FaceLandmarks, Landmark, StaticLandmarker};
pub use error::{AnalysisError, Result};
pub use outfit::{CatalogItem, CompatibilityEngine, Recommendations, RuleTable};
pub use pipeline::{analyze_face, CaptureSession, CaptureState, ScanOutcome};
pub use sampling::{ClassificationResult, FaceSampler, SampleSource, SampledColor};
pub use tone::{SkinToneClassifier, ToneBand, ToneId};
