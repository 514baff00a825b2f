//! Exposure correction for sampled skin colors
//!
//! Camera exposure varies with lighting and with the skin tone itself.
//! Samples whose HSV value falls outside the configured band are pulled
//! halfway toward a target value; samples inside the band pass through
//! unchanged. Hue and saturation are preserved.

use log::debug;

use crate::color::{ColorConverter, Rgb8};
use crate::config::BrightnessConfig;

/// HSV value-channel normalizer
#[derive(Debug, Clone)]
pub struct BrightnessNormalizer {
    converter: ColorConverter,
    config: BrightnessConfig,
}

impl Default for BrightnessNormalizer {
    fn default() -> Self {
        Self::new(BrightnessConfig::default())
    }
}

impl BrightnessNormalizer {
    /// Create a normalizer for the given exposure band
    pub fn new(config: BrightnessConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            config,
        }
    }

    /// Exposure band in use
    pub fn config(&self) -> &BrightnessConfig {
        &self.config
    }

    /// Target value for a given HSV value
    ///
    /// Returns the input unchanged when it lies inside the band.
    pub fn target_value(&self, value: f64) -> f64 {
        if value < self.config.dark_threshold {
            self.config.dark_target
        } else if value > self.config.bright_threshold {
            self.config.bright_target
        } else {
            value
        }
    }

    /// Damped correction: the mean of the current value and its target
    pub fn corrected_value(&self, value: f64) -> f64 {
        (value + self.target_value(value)) / 2.0
    }

    /// Normalize the brightness of an sRGB sample
    ///
    /// # Arguments
    ///
    /// * `rgb` - Averaged skin sample
    ///
    /// # Returns
    ///
    /// The sample with its HSV value remapped, rounded back to 8 bits
    pub fn normalize(&self, rgb: Rgb8) -> Rgb8 {
        let mut hsv = self.converter.rgb_to_hsv(rgb);
        let original = hsv.value;
        hsv.value = self.corrected_value(original);

        let corrected = self.converter.hsv_to_rgb(hsv);
        debug!(
            "Brightness {:.3} -> {:.3}: {:?} -> {:?}",
            original, hsv.value, rgb, corrected
        );
        corrected
    }
}
