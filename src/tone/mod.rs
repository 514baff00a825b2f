//! Skin-tone palette and classification module
//!
//! This module holds the reference tones, the coarse tone bands derived
//! from them and the nearest-tone classifier.

pub mod band;
pub mod classifier;
pub mod reference;

pub use band::ToneBand;
pub use classifier::{SkinToneClassifier, ToneMatch};
pub use reference::{ReferenceTone, SkinPalette, ToneId, Undertone};
