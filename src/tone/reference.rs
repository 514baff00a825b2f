//! Reference skin-tone palette
//!
//! The palette is built once from configuration. Each tone's Lab value is
//! derived from its sRGB color when the palette is constructed and cannot be
//! set independently.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{ColorConverter, Lab, Rgb8};
use crate::config::ToneSpec;
use crate::{AnalysisError, Result};

/// Number of reference tones
pub const TONE_COUNT: usize = 6;

/// Skin tone identifier, 1 (lightest) through 6 (deepest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToneId(u8);

impl ToneId {
    /// Every valid id in ascending order
    pub const ALL: [ToneId; TONE_COUNT] =
        [ToneId(1), ToneId(2), ToneId(3), ToneId(4), ToneId(5), ToneId(6)];

    /// Validate a raw id
    pub fn new(id: u8) -> Result<Self> {
        if (1..=TONE_COUNT as u8).contains(&id) {
            Ok(Self(id))
        } else {
            Err(AnalysisError::invalid_parameter("tone_id", id))
        }
    }

    /// Raw id value
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ToneId {
    type Error = AnalysisError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id)
    }
}

impl From<ToneId> for u8 {
    fn from(id: ToneId) -> u8 {
        id.0
    }
}

impl fmt::Display for ToneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undertone label shown alongside a reference tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    Cool,
    Warm,
    Neutral,
}

/// Immutable reference tone with its precomputed Lab value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTone {
    id: ToneId,
    srgb: Rgb8,
    lab: Lab,
    hex: String,
    name: String,
    description: String,
    undertone: Undertone,
}

impl ReferenceTone {
    /// Build a tone from its configuration entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an out-of-range id or malformed hex color
    pub fn from_spec(spec: &ToneSpec, converter: &ColorConverter) -> Result<Self> {
        let id = ToneId::new(spec.id)?;
        let srgb = converter.hex_to_srgb(&spec.hex)?;

        Ok(Self {
            id,
            srgb,
            lab: converter.rgb_to_lab(srgb),
            hex: converter.srgb_to_hex(srgb),
            name: spec.name.clone(),
            description: spec.description.clone(),
            undertone: spec.undertone,
        })
    }

    pub fn id(&self) -> ToneId {
        self.id
    }

    pub fn srgb(&self) -> Rgb8 {
        self.srgb
    }

    /// Lab value derived from [`srgb`](Self::srgb)
    pub fn lab(&self) -> Lab {
        self.lab
    }

    /// Normalized "#RRGGBB" form
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn undertone(&self) -> Undertone {
        self.undertone
    }
}

/// The six reference tones, ordered by ascending id
///
/// Read-only after construction and safe to share between threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinPalette {
    tones: Vec<ReferenceTone>,
}

impl SkinPalette {
    /// Build the palette from configuration entries
    ///
    /// Entries may appear in any order but must cover ids 1 through 6
    /// exactly once.
    pub fn from_config(specs: &[ToneSpec]) -> Result<Self> {
        let converter = ColorConverter::new();
        let mut tones = specs
            .iter()
            .map(|spec| ReferenceTone::from_spec(spec, &converter))
            .collect::<Result<Vec<_>>>()?;
        tones.sort_by_key(|tone| tone.id);

        let ids: Vec<ToneId> = tones.iter().map(|tone| tone.id).collect();
        if ids != ToneId::ALL {
            return Err(AnalysisError::invalid_parameter(
                "palette",
                format!("ids {:?}, expected 1..=6 once each", ids),
            ));
        }

        Ok(Self { tones })
    }

    /// Tones in ascending id order
    pub fn tones(&self) -> &[ReferenceTone] {
        &self.tones
    }

    /// Look up a tone by id
    pub fn get(&self, id: ToneId) -> &ReferenceTone {
        // ids are validated as exactly 1..=6 in order at construction
        &self.tones[id.get() as usize - 1]
    }
}
