//! Colorimetric constants and default tuning values
//!
//! This module contains compile-time constants for the color pipeline,
//! the brightness correction band and the face sampling layout.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the standard reference for digital
/// images and computer displays.
pub mod d65 {
    /// D65 white point in CIE XYZ, scaled so that Y = 100
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f64; 3] = [95.047, 100.000, 108.883];
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f64; 3] = d65::WHITE_POINT_XYZ;

/// sRGB transfer function and primaries
pub mod srgb {
    /// Encoded value below which the transfer curve is linear
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Slope divisor of the linear segment
    pub const LINEAR_DIVISOR: f64 = 12.92;

    /// Exponent of the power-law segment
    pub const GAMMA: f64 = 2.4;

    /// Linear sRGB to XYZ (D65), rows are X, Y, Z
    pub const TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
}

/// CIELAB companding
pub mod lab {
    /// Normalized XYZ ratio below which the linear segment is used
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear segment
    pub const LINEAR_SLOPE: f64 = 7.787;

    /// Offset of the linear segment (16/116)
    pub const LINEAR_OFFSET: f64 = 16.0 / 116.0;
}

/// Exposure band used by brightness normalization (HSV value channel)
pub mod brightness {
    /// Values below this are considered underexposed
    pub const DARK_THRESHOLD: f64 = 0.4;

    /// Value pulled toward for underexposed samples
    pub const DARK_TARGET: f64 = 0.5;

    /// Values above this are considered overexposed
    pub const BRIGHT_THRESHOLD: f64 = 0.9;

    /// Value pulled toward for overexposed samples
    pub const BRIGHT_TARGET: f64 = 0.85;
}

/// Face sampling layout
pub mod sampling {
    /// Forehead center in the 478-point face mesh
    pub const FOREHEAD: usize = 151;

    /// Left cheek in the 478-point face mesh
    pub const LEFT_CHEEK: usize = 50;

    /// Right cheek in the 478-point face mesh
    pub const RIGHT_CHEEK: usize = 280;

    /// Default landmarks sampled for skin color
    pub const DEFAULT_LANDMARKS: [usize; 3] = [FOREHEAD, LEFT_CHEEK, RIGHT_CHEEK];

    /// Side of the square neighborhood averaged around each landmark
    pub const WINDOW_SIZE: u32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d65_constants() {
        assert!((d65::WHITE_POINT_XYZ[0] - 95.047).abs() < 1e-9);
        assert!((d65::WHITE_POINT_XYZ[1] - 100.0).abs() < 1e-9);
        assert!((d65::WHITE_POINT_XYZ[2] - 108.883).abs() < 1e-9);
    }

    #[test]
    fn test_srgb_matrix_rows_sum_to_white() {
        // Linear white (1, 1, 1) maps to the D65 white point within matrix precision
        for (row, white) in srgb::TO_XYZ.iter().zip(D65_WHITE_POINT_XYZ) {
            let sum: f64 = row.iter().sum();
            assert!((sum * 100.0 - white).abs() < 0.1);
        }
    }

    #[test]
    fn test_brightness_band_ordering() {
        assert!(brightness::DARK_THRESHOLD < brightness::DARK_TARGET);
        assert!(brightness::BRIGHT_TARGET < brightness::BRIGHT_THRESHOLD);
        assert!(brightness::DARK_TARGET < brightness::BRIGHT_TARGET);
    }

    #[test]
    fn test_window_is_odd() {
        assert_eq!(sampling::WINDOW_SIZE % 2, 1);
    }
}
