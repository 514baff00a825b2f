//! Color conversion module
//!
//! This module handles the color space conversions shared by the
//! brightness correction and skin-tone classification stages.

pub mod conversion;

pub use conversion::ColorConverter;

use palette::white_point::D65;

/// 8-bit sRGB triple as sampled from an image
pub type Rgb8 = palette::Srgb<u8>;

/// CIE XYZ under D65, Y scaled to 100
pub type Xyz = palette::Xyz<D65, f64>;

/// CIELAB under D65
pub type Lab = palette::Lab<D65, f64>;

/// HSV over the sRGB encoding, hue in degrees
pub type Hsv = palette::Hsv<palette::encoding::Srgb, f64>;
