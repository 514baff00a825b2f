//! Color space conversion utilities
//!
//! Provides the deterministic conversions the skin-tone pipeline relies on:
//! - sRGB (0-255) to CIE XYZ (D65, Y scaled to 100)
//! - XYZ to CIELAB
//! - sRGB to/from HSV for exposure correction
//! - CIE76 Delta E
//! - Hex color representation
//!
//! Channel values are not range-checked on the `f64` entry points. Values
//! outside [0, 255] propagate as distorted but finite results.

use palette::{FromColor, Srgb};

use super::{Hsv, Lab, Rgb8, Xyz};
use crate::constants::{lab, srgb, D65_WHITE_POINT_XYZ};
use crate::{AnalysisError, Result};

/// Color converter bound to a reference white
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter {
    /// Reference white in XYZ (Y = 100)
    white_point: [f64; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Reference white used for Lab normalization
    pub fn white_point(&self) -> [f64; 3] {
        self.white_point
    }

    /// Convert sRGB channels in [0, 255] to XYZ
    ///
    /// Applies the piecewise sRGB decoding curve, then the linear sRGB to
    /// XYZ matrix. The result is scaled so that white has Y = 100.
    pub fn srgb_to_xyz(&self, r: f64, g: f64, b: f64) -> Xyz {
        let linear = [r, g, b].map(|channel| decode_channel(channel / 255.0) * 100.0);
        let [x, y, z] = srgb::TO_XYZ.map(|row| {
            row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2]
        });
        Xyz::new(x, y, z)
    }

    /// Convert XYZ (Y = 100 scale) to CIELAB
    pub fn xyz_to_lab(&self, xyz: Xyz) -> Lab {
        let fx = compand(xyz.x / self.white_point[0]);
        let fy = compand(xyz.y / self.white_point[1]);
        let fz = compand(xyz.z / self.white_point[2]);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Convert an 8-bit sRGB color to CIELAB
    ///
    /// # Arguments
    ///
    /// * `rgb` - sRGB color with channels in [0, 255]
    ///
    /// # Returns
    ///
    /// Lab color relative to the converter's reference white
    pub fn rgb_to_lab(&self, rgb: Rgb8) -> Lab {
        let xyz = self.srgb_to_xyz(rgb.red as f64, rgb.green as f64, rgb.blue as f64);
        self.xyz_to_lab(xyz)
    }

    /// Compute Delta E (color difference) between two Lab colors
    ///
    /// Uses simple Euclidean distance (ΔE76). Hue differences are not
    /// weighted, so saturated colors can read closer than they look.
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f64 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// Convert an 8-bit sRGB color to HSV
    ///
    /// Saturation and value are in [0, 1], hue in degrees.
    pub fn rgb_to_hsv(&self, rgb: Rgb8) -> Hsv {
        Hsv::from_color(rgb.into_format::<f64>())
    }

    /// Convert HSV back to 8-bit sRGB, rounding each channel
    pub fn hsv_to_rgb(&self, hsv: Hsv) -> Rgb8 {
        let rgb = Srgb::<f64>::from_color(hsv);
        Srgb::new(
            to_byte(rgb.red),
            to_byte(rgb.green),
            to_byte(rgb.blue),
        )
    }

    /// Convert sRGB to hexadecimal color string
    ///
    /// # Returns
    ///
    /// Hex color string (e.g., "#CF9E76")
    pub fn srgb_to_hex(&self, rgb: Rgb8) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
    }

    /// Parse hexadecimal color string to sRGB
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "#FF0000" or "FF0000")
    ///
    /// # Errors
    ///
    /// Returns error if hex string is invalid
    pub fn hex_to_srgb(&self, hex: &str) -> Result<Rgb8> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AnalysisError::invalid_parameter("hex", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| AnalysisError::invalid_parameter("hex", hex))
        };

        Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// sRGB electro-optical transfer function on a [0, 1] channel
fn decode_channel(v: f64) -> f64 {
    if v > srgb::LINEAR_THRESHOLD {
        ((v + 0.055) / 1.055).powf(srgb::GAMMA)
    } else {
        v / srgb::LINEAR_DIVISOR
    }
}

/// CIE cube-root companding with linear toe
fn compand(t: f64) -> f64 {
    if t > lab::EPSILON {
        t.cbrt()
    } else {
        lab::LINEAR_SLOPE * t + lab::LINEAR_OFFSET
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb8 {
        Srgb::new(r, g, b)
    }

    #[test]
    fn test_rgb_to_lab_black() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(rgb(0, 0, 0));
        assert!(lab.l.abs() < 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_lab_white() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(rgb(255, 255, 255));
        assert!((lab.l - 100.0).abs() < 0.01);
        assert!(lab.a.abs() < 0.1);
        assert!(lab.b.abs() < 0.1);
    }

    #[test]
    fn test_srgb_to_xyz_white_luminance() {
        let converter = ColorConverter::new();
        let xyz = converter.srgb_to_xyz(255.0, 255.0, 255.0);
        assert!((xyz.y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_white_maps_to_reference_white() {
        let converter = ColorConverter::new();
        assert_eq!(converter.white_point(), D65_WHITE_POINT_XYZ);

        let xyz = converter.srgb_to_xyz(255.0, 255.0, 255.0);
        let [xw, yw, zw] = converter.white_point();
        assert!((xyz.x - xw).abs() < 0.1);
        assert!((xyz.y - yw).abs() < 0.1);
        assert!((xyz.z - zw).abs() < 0.1);
    }

    #[test]
    fn test_srgb_to_xyz_linear_segment() {
        // 10/255 falls below the 0.04045 threshold
        let converter = ColorConverter::new();
        let xyz = converter.srgb_to_xyz(10.0, 10.0, 10.0);
        let expected_y = 10.0 / 255.0 / 12.92 * 100.0;
        assert!((xyz.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_reference_tone_lab() {
        // #CF9E76, a mid skin tone
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(rgb(207, 158, 118));
        assert!((lab.l - 68.77).abs() < 0.01);
        assert!((lab.a - 13.10).abs() < 0.01);
        assert!((lab.b - 27.92).abs() < 0.01);
    }

    #[test]
    fn test_out_of_range_input_propagates() {
        let converter = ColorConverter::new();
        let xyz = converter.srgb_to_xyz(300.0, -20.0, 128.0);
        assert!(xyz.x.is_finite() && xyz.y.is_finite() && xyz.z.is_finite());
    }

    #[test]
    fn test_delta_e_same_color() {
        let converter = ColorConverter::new();
        let lab = Lab::new(50.0, 0.0, 0.0);
        assert_eq!(converter.delta_e(lab, lab), 0.0);
    }

    #[test]
    fn test_delta_e_symmetric() {
        let converter = ColorConverter::new();
        let lab1 = Lab::new(50.0, 0.0, 0.0);
        let lab2 = Lab::new(60.0, 10.0, 10.0);
        let forward = converter.delta_e(lab1, lab2);
        assert_eq!(forward, converter.delta_e(lab2, lab1));
        assert!((forward - 300.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_hsv_of_primary() {
        let converter = ColorConverter::new();
        let hsv = converter.rgb_to_hsv(rgb(255, 0, 0));
        assert!(hsv.hue.into_positive_degrees().abs() < 1e-9);
        assert!((hsv.saturation - 1.0).abs() < 1e-9);
        assert!((hsv.value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsv_round_trip() {
        let converter = ColorConverter::new();
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(51) {
                    let original = rgb(r as u8, g as u8, b as u8);
                    let back = converter.hsv_to_rgb(converter.rgb_to_hsv(original));
                    assert!((back.red as i16 - original.red as i16).abs() <= 1);
                    assert!((back.green as i16 - original.green as i16).abs() <= 1);
                    assert!((back.blue as i16 - original.blue as i16).abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_srgb_to_hex() {
        let converter = ColorConverter::new();
        assert_eq!(converter.srgb_to_hex(rgb(255, 223, 196)), "#FFDFC4");
        assert_eq!(converter.srgb_to_hex(rgb(0, 0, 0)), "#000000");
    }

    #[test]
    fn test_hex_to_srgb() {
        let converter = ColorConverter::new();

        let tone = converter.hex_to_srgb("#A87652").unwrap();
        assert_eq!(tone, rgb(168, 118, 82));

        let without_hash = converter.hex_to_srgb("4b2c20").unwrap();
        assert_eq!(without_hash, rgb(75, 44, 32));
    }

    #[test]
    fn test_hex_to_srgb_invalid() {
        let converter = ColorConverter::new();

        assert!(converter.hex_to_srgb("#FF").is_err());
        assert!(converter.hex_to_srgb("#GGGGGG").is_err());
        assert!(converter.hex_to_srgb("#ÄÄÄÄ").is_err());
    }
}
