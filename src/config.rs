//! Configuration structures for the skin-tone and outfit matching pipeline.
//!
//! This module defines all tunable parameters, organized into logical
//! groups for face sampling, brightness correction, the reference palette
//! and the outfit compatibility rules. Every component receives its slice of
//! the configuration through its constructor; nothing is read from globals.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use vesto_core::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), vesto_core::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SamplingConfig`]: landmark indices and neighborhood size
//! - [`BrightnessConfig`]: exposure band for value-channel correction
//! - [`ToneSpec`]: the six reference skin tones
//! - [`RuleTable`]: curated garment pairings

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{brightness, sampling};
use crate::outfit::RuleTable;
use crate::tone::{SkinPalette, Undertone};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON so a deployment can recalibrate the
/// exposure band or extend the style vocabulary without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Face sampling configuration
    pub sampling: SamplingConfig,

    /// Brightness correction configuration
    pub brightness: BrightnessConfig,

    /// Reference skin tones, ids 1 through 6
    pub palette: Vec<ToneSpec>,

    /// Outfit compatibility rules
    #[serde(default = "RuleTable::builtin")]
    pub rules: RuleTable,
}

/// Face sampling parameters.
///
/// Landmark indices are specific to the detector's point scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Landmarks whose neighborhoods are averaged into one skin sample
    pub landmark_indices: Vec<usize>,

    /// Side of the square neighborhood in pixels (must be odd)
    pub window_size: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            landmark_indices: sampling::DEFAULT_LANDMARKS.to_vec(),
            window_size: sampling::WINDOW_SIZE,
        }
    }
}

/// Exposure band for brightness normalization.
///
/// All values are on the HSV value scale [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrightnessConfig {
    /// Values below this are pulled toward `dark_target`
    pub dark_threshold: f64,

    /// Target for underexposed samples
    pub dark_target: f64,

    /// Values above this are pulled toward `bright_target`
    pub bright_threshold: f64,

    /// Target for overexposed samples
    pub bright_target: f64,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            dark_threshold: brightness::DARK_THRESHOLD,
            dark_target: brightness::DARK_TARGET,
            bright_threshold: brightness::BRIGHT_THRESHOLD,
            bright_target: brightness::BRIGHT_TARGET,
        }
    }
}

/// One reference skin tone as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Tone id, 1 (lightest) to 6 (deepest)
    pub id: u8,

    /// sRGB color as "#RRGGBB"
    pub hex: String,

    /// Display name
    pub name: String,

    /// Short description shown next to the swatch
    pub description: String,

    /// Undertone label
    pub undertone: Undertone,
}

impl ToneSpec {
    fn new(id: u8, hex: &str, name: &str, description: &str, undertone: Undertone) -> Self {
        Self {
            id,
            hex: hex.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            undertone,
        }
    }

    /// The six Fitzpatrick-style reference tones
    pub fn default_palette() -> Vec<ToneSpec> {
        vec![
            ToneSpec::new(1, "#FFDFC4", "Type I", "Light, Pale White", Undertone::Cool),
            ToneSpec::new(2, "#E6B998", "Type II", "White, Fair", Undertone::Cool),
            ToneSpec::new(3, "#CF9E76", "Type III", "Medium, White to Olive", Undertone::Warm),
            ToneSpec::new(4, "#A87652", "Type IV", "Olive, Moderate Brown", Undertone::Neutral),
            ToneSpec::new(5, "#75482F", "Type V", "Brown, Dark Brown", Undertone::Warm),
            ToneSpec::new(6, "#4B2C20", "Type VI", "Black, Very Dark Brown", Undertone::Neutral),
        ]
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            brightness: BrightnessConfig::default(),
            palette: ToneSpec::default_palette(),
            rules: RuleTable::builtin(),
        }
    }
}

impl PipelineConfig {
    /// Check parameter ranges and palette completeness
    pub fn validate(&self) -> Result<()> {
        if self.sampling.landmark_indices.is_empty() {
            return Err(AnalysisError::invalid_parameter(
                "sampling.landmark_indices",
                "[]",
            ));
        }

        let window = self.sampling.window_size;
        if window == 0 || window % 2 == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.window_size", window));
        }

        let band = &self.brightness;
        let values = [
            ("brightness.dark_threshold", band.dark_threshold),
            ("brightness.dark_target", band.dark_target),
            ("brightness.bright_threshold", band.bright_threshold),
            ("brightness.bright_target", band.bright_target),
        ];
        for (name, value) in values {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::invalid_parameter(name, value));
            }
        }
        if band.dark_threshold > band.bright_threshold {
            return Err(AnalysisError::invalid_parameter(
                "brightness.dark_threshold",
                format!("{} > bright_threshold {}", band.dark_threshold, band.bright_threshold),
            ));
        }
        if band.dark_target <= band.dark_threshold {
            return Err(AnalysisError::invalid_parameter(
                "brightness.dark_target",
                format!("{} <= dark_threshold {}", band.dark_target, band.dark_threshold),
            ));
        }
        if band.bright_target >= band.bright_threshold {
            return Err(AnalysisError::invalid_parameter(
                "brightness.bright_target",
                format!("{} >= bright_threshold {}", band.bright_target, band.bright_threshold),
            ));
        }

        SkinPalette::from_config(&self.palette)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| AnalysisError::config("Invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling.landmark_indices, vec![151, 50, 280]);
        assert_eq!(config.palette.len(), 6);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = PipelineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rules_default_when_missing() {
        let mut value = serde_json::to_value(PipelineConfig::default()).unwrap();
        value.as_object_mut().unwrap().remove("rules");
        let parsed = PipelineConfig::from_json_str(&value.to_string()).unwrap();
        assert_eq!(parsed.rules, RuleTable::builtin());
    }

    #[test]
    fn test_even_window_rejected() {
        let mut config = PipelineConfig::default();
        config.sampling.window_size = 4;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = PipelineConfig::default();
        config.brightness.dark_threshold = 0.95;
        assert!(config.validate().is_err());

        // Targets on the wrong side of their thresholds would invert the correction
        let mut config = PipelineConfig::default();
        config.brightness.dark_target = 0.1;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { ref parameter, .. }) if parameter == "brightness.dark_target"
        ));

        let mut config = PipelineConfig::default();
        config.brightness.bright_target = 0.99;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { ref parameter, .. }) if parameter == "brightness.bright_target"
        ));
    }

    #[test]
    fn test_incomplete_palette_rejected() {
        let mut config = PipelineConfig::default();
        config.palette.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = PipelineConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(AnalysisError::ConfigError { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("vesto_config_{}.json", std::process::id()));
        let config = PipelineConfig::default();
        config.to_json_file(&path).unwrap();
        let loaded = PipelineConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
