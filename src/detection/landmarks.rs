//! Face-landmark detector contract
//!
//! The pipeline never loads or runs an inference model itself. Any detector
//! that maps an RGB image to zero or one face's landmark set can be plugged
//! in through [`FaceLandmarker`].

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// A landmark in normalized image coordinates
///
/// `x` and `y` are fractions of the image width and height. Detectors may
/// report points slightly outside [0, 1] for faces touching the frame edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel coordinates for an image of the given size, rounded down
    pub fn to_pixel(self, width: u32, height: u32) -> (i64, i64) {
        let px = (self.x as f64 * width as f64).floor() as i64;
        let py = (self.y as f64 * height as f64).floor() as i64;
        (px, py)
    }
}

/// Landmark set for one detected face, indexed by the detector's scheme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    /// True if every index in `indices` has a point
    pub fn covers(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&index| index < self.points.len())
    }
}

/// Face-landmark detection capability
pub trait FaceLandmarker {
    /// Detect at most one face
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no face is present, `Err` on a detector/runtime failure
    fn detect_face(&self, image: &RgbImage) -> Result<Option<FaceLandmarks>>;
}

impl<F> FaceLandmarker for F
where
    F: Fn(&RgbImage) -> Result<Option<FaceLandmarks>>,
{
    fn detect_face(&self, image: &RgbImage) -> Result<Option<FaceLandmarks>> {
        self(image)
    }
}

/// Detector that returns a fixed answer regardless of the image
///
/// Useful for tests and for replaying landmarks computed elsewhere.
#[derive(Debug, Clone)]
pub enum StaticLandmarker {
    /// Always reports this face
    Face(FaceLandmarks),
    /// Never finds a face
    NoFace,
    /// Always fails with this message
    Failing(String),
}

impl FaceLandmarker for StaticLandmarker {
    fn detect_face(&self, _image: &RgbImage) -> Result<Option<FaceLandmarks>> {
        match self {
            StaticLandmarker::Face(landmarks) => Ok(Some(landmarks.clone())),
            StaticLandmarker::NoFace => Ok(None),
            StaticLandmarker::Failing(message) => Err(AnalysisError::DetectorError {
                message: message.clone(),
                source: None,
            }),
        }
    }
}
