//! Lighting calibration module
//!
//! This module corrects exposure bias in sampled skin colors before
//! they are classified.

pub mod brightness;

pub use brightness::BrightnessNormalizer;
