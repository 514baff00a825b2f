//! Face detection module
//!
//! This module defines the narrow contract the pipeline uses to obtain
//! facial landmarks from an external detector.

pub mod landmarks;

pub use landmarks::{FaceLandmarker, FaceLandmarks, Landmark, StaticLandmarker};
