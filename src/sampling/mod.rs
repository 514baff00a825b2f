//! Skin sampling module
//!
//! This module turns a detected face into a single corrected skin color
//! and classifies it.

pub mod face;

pub use face::{ClassificationResult, FaceSampler, SampleSource, SampledColor};
