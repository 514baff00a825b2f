//! Nearest-reference skin-tone classification
//!
//! A sample is converted to Lab and compared against every reference tone
//! with CIE76 Delta E. The closest tone always wins; there is no rejection
//! threshold, so colors far from any skin tone still receive an id.
//!
//! Exact ties resolve to the lowest id.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{SkinPalette, ToneBand, ToneId};
use crate::color::{ColorConverter, Rgb8};

/// Closest reference tone and its distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneMatch {
    /// Matched reference tone
    pub tone_id: ToneId,
    /// Delta E between the sample and the matched tone
    pub delta_e: f64,
}

impl ToneMatch {
    pub fn band(&self) -> ToneBand {
        ToneBand::from_tone(self.tone_id)
    }
}

/// Classifier over a fixed reference palette
#[derive(Debug, Clone)]
pub struct SkinToneClassifier {
    converter: ColorConverter,
    palette: SkinPalette,
}

impl SkinToneClassifier {
    /// Create a classifier over the given palette
    pub fn new(palette: SkinPalette) -> Self {
        Self {
            converter: ColorConverter::new(),
            palette,
        }
    }

    pub fn palette(&self) -> &SkinPalette {
        &self.palette
    }

    /// Id of the reference tone nearest to `sample`
    pub fn classify(&self, sample: Rgb8) -> ToneId {
        self.classify_with_distance(sample).tone_id
    }

    /// Nearest reference tone together with its Delta E
    pub fn classify_with_distance(&self, sample: Rgb8) -> ToneMatch {
        let lab = self.converter.rgb_to_lab(sample);

        let mut best = ToneMatch {
            tone_id: ToneId::ALL[0],
            delta_e: f64::INFINITY,
        };
        for tone in self.palette.tones() {
            let delta_e = self.converter.delta_e(lab, tone.lab());
            // Strict comparison keeps the first (lowest id) of equal minima
            if delta_e < best.delta_e {
                best = ToneMatch {
                    tone_id: tone.id(),
                    delta_e,
                };
            }
        }

        debug!(
            "Classified {:?} as tone {} (ΔE {:.2})",
            sample, best.tone_id, best.delta_e
        );
        best
    }
}
