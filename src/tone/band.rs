//! Coarse tone bands derived from tone ids
//!
//! Stored records carry the band alongside the id, so the id-to-band mapping
//! must not change without migrating those records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ToneId;
use crate::outfit::BaseColor;

/// Normalized tone band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneBand {
    Fair,
    Medium,
    Tan,
    Deep,
}

impl ToneBand {
    pub const ALL: [ToneBand; 4] = [ToneBand::Fair, ToneBand::Medium, ToneBand::Tan, ToneBand::Deep];

    /// Band for a tone id: 1-2 fair, 3 medium, 4 tan, 5-6 deep
    pub fn from_tone(id: ToneId) -> Self {
        match id.get() {
            1 | 2 => ToneBand::Fair,
            3 => ToneBand::Medium,
            4 => ToneBand::Tan,
            _ => ToneBand::Deep,
        }
    }

    /// Garment base colors that flatter this band, best first
    pub fn color_priority(self) -> &'static [BaseColor] {
        match self {
            ToneBand::Fair => &[BaseColor::Cool, BaseColor::Neutral],
            ToneBand::Medium => &[BaseColor::Neutral, BaseColor::Earthy],
            ToneBand::Tan => &[BaseColor::Earthy, BaseColor::Warm],
            ToneBand::Deep => &[BaseColor::Warm, BaseColor::Cool],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToneBand::Fair => "fair",
            ToneBand::Medium => "medium",
            ToneBand::Tan => "tan",
            ToneBand::Deep => "deep",
        }
    }
}

impl From<ToneId> for ToneBand {
    fn from(id: ToneId) -> Self {
        Self::from_tone(id)
    }
}

impl fmt::Display for ToneBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
