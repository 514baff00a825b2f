//! Skin color sampling at facial landmarks
//!
//! Implements the sampling stage that:
//! - Maps configured landmarks (forehead, cheeks) to pixel coordinates
//! - Averages a small square neighborhood around each to suppress sensor noise
//! - Averages the per-landmark samples to reduce local shadow/highlight bias
//! - Corrects exposure and classifies the result against the reference palette
//!
//! Neighborhoods that would extend past the image border are clamped to the
//! valid pixel range instead of failing.

use image::RgbImage;
use log::{debug, info, warn};
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::calibration::BrightnessNormalizer;
use crate::color::Rgb8;
use crate::config::{PipelineConfig, SamplingConfig};
use crate::detection::{FaceLandmarks, Landmark};
use crate::tone::{SkinPalette, SkinToneClassifier, ToneBand, ToneId};
use crate::{AnalysisError, Result};

/// Where the analyzed image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSource {
    Capture,
    Upload,
}

/// Averaged skin color before exposure correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledColor {
    pub rgb: Rgb8,
    pub source: SampleSource,
}

/// Outcome of one classification request
///
/// Not persisted by this crate; callers store or display it and discard it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Matched reference tone
    pub tone_id: ToneId,
    /// Band derived from `tone_id`
    pub band: ToneBand,
    /// Delta E between the corrected sample and the matched tone
    pub delta_e: f64,
    /// Averaged sample as read from the image
    pub sample: SampledColor,
    /// Sample after brightness normalization, as classified
    pub corrected: Rgb8,
}

/// Samples skin color from a face and classifies it
#[derive(Debug, Clone)]
pub struct FaceSampler {
    config: SamplingConfig,
    normalizer: BrightnessNormalizer,
    classifier: SkinToneClassifier,
}

impl FaceSampler {
    /// Create a sampler from its collaborators
    pub fn new(
        config: SamplingConfig,
        normalizer: BrightnessNormalizer,
        classifier: SkinToneClassifier,
    ) -> Self {
        Self {
            config,
            normalizer,
            classifier,
        }
    }

    /// Build the sampler and its collaborators from pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let palette = SkinPalette::from_config(&config.palette)?;

        Ok(Self::new(
            config.sampling.clone(),
            BrightnessNormalizer::new(config.brightness.clone()),
            SkinToneClassifier::new(palette),
        ))
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn classifier(&self) -> &SkinToneClassifier {
        &self.classifier
    }

    /// Sample, correct and classify a detected face
    ///
    /// # Arguments
    ///
    /// * `image` - Image the landmarks were detected on
    /// * `landmarks` - One face's landmarks; must cover every configured index
    /// * `source` - Whether the image was captured or uploaded
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the landmark set lacks a configured index
    /// and `ProcessingError` for an empty image
    pub fn sample(
        &self,
        image: &RgbImage,
        landmarks: &FaceLandmarks,
        source: SampleSource,
    ) -> Result<ClassificationResult> {
        let averaged = self.average_skin_color(image, landmarks)?;
        let corrected = self.normalizer.normalize(averaged);
        let tone = self.classifier.classify_with_distance(corrected);

        info!(
            "Skin tone {} ({}) from {:?} sample {:?}, ΔE {:.2}",
            tone.tone_id,
            tone.band(),
            source,
            averaged,
            tone.delta_e
        );

        Ok(ClassificationResult {
            tone_id: tone.tone_id,
            band: tone.band(),
            delta_e: tone.delta_e,
            sample: SampledColor {
                rgb: averaged,
                source,
            },
            corrected,
        })
    }

    /// Mean skin color over all configured landmarks
    ///
    /// Each landmark's neighborhood mean is rounded to 8 bits before the
    /// landmarks are averaged together.
    pub fn average_skin_color(&self, image: &RgbImage, landmarks: &FaceLandmarks) -> Result<Rgb8> {
        let indices = &self.config.landmark_indices;
        if indices.is_empty() {
            return Err(AnalysisError::invalid_parameter("sampling.landmark_indices", "[]"));
        }

        let mut totals = [0u32; 3];
        for &index in indices {
            let landmark = landmarks.get(index).ok_or_else(|| {
                AnalysisError::invalid_parameter(
                    "landmarks",
                    format!("index {} missing from {} points", index, landmarks.len()),
                )
            })?;
            let sample = self.sample_region(image, landmark)?;
            debug!("Landmark {} at {:?}: {:?}", index, landmark, sample);

            totals[0] += sample.red as u32;
            totals[1] += sample.green as u32;
            totals[2] += sample.blue as u32;
        }

        let [r, g, b] = totals.map(|total| rounded_mean(total as u64, indices.len() as u64));
        Ok(Srgb::new(r, g, b))
    }

    /// Mean color of the neighborhood around one landmark
    ///
    /// The window center is clamped into the image first, then the window is
    /// intersected with the image bounds.
    pub fn sample_region(&self, image: &RgbImage, landmark: Landmark) -> Result<Rgb8> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::ProcessingError(
                "Cannot sample an empty image".to_string(),
            ));
        }

        let (px, py) = landmark.to_pixel(width, height);
        let half = (self.config.window_size / 2) as i64;
        let (x0, x1) = clamp_window(px, half, width);
        let (y0, y1) = clamp_window(py, half, height);

        let full = (2 * half + 1) as u64;
        let area = (x1 - x0 + 1) as u64 * (y1 - y0 + 1) as u64;
        if area < full * full {
            warn!(
                "Sample window at ({}, {}) clamped to x {}..={}, y {}..={}",
                px, py, x0, x1, y0, y1
            );
        }

        let mut totals = [0u64; 3];
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel = image.get_pixel(x, y);
                for (total, &channel) in totals.iter_mut().zip(pixel.0.iter()) {
                    *total += channel as u64;
                }
            }
        }

        let [r, g, b] = totals.map(|total| rounded_mean(total, area));
        Ok(Srgb::new(r, g, b))
    }
}

/// Inclusive window bounds around `center`, clamped to `0..len`
fn clamp_window(center: i64, half: i64, len: u32) -> (u32, u32) {
    let last = len as i64 - 1;
    let center = center.clamp(0, last);
    let start = (center - half).max(0);
    let end = (center + half).min(last);
    (start as u32, end as u32)
}

/// Mean rounded half away from zero, as 8 bits
fn rounded_mean(total: u64, count: u64) -> u8 {
    ((total * 2 + count) / (count * 2)).min(255) as u8
}
