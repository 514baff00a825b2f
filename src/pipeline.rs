//! Capture flow state machine
//!
//! A [`CaptureSession`] drives one image through detection, sampling and
//! classification:
//!
//! ```text
//! Idle --begin--> Detecting --face--> Sampling --> Classified
//!                     |
//!                     +--no face--> NoFaceFound --retry--> Idle
//!                     +--error----> Failed ------retry--> Idle
//! ```
//!
//! The sampler only ever runs on a landmark set that covers every configured
//! index; anything less ends in `NoFaceFound`.

use image::RgbImage;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::detection::FaceLandmarker;
use crate::image_loader::load_image;
use crate::sampling::{ClassificationResult, FaceSampler, SampleSource};
use crate::{AnalysisError, Result};

/// Where a capture session currently is
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    /// Waiting on the detector for an image from this source
    Detecting(SampleSource),
    Sampling,
    Classified(ClassificationResult),
    NoFaceFound,
    /// Detector or runtime failure, with its message
    Failed(String),
}

impl CaptureState {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Detecting(_) => "detecting",
            CaptureState::Sampling => "sampling",
            CaptureState::Classified(_) => "classified",
            CaptureState::NoFaceFound => "no face found",
            CaptureState::Failed(_) => "failed",
        }
    }

    /// True once the session has produced an outcome
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaptureState::Classified(_) | CaptureState::NoFaceFound | CaptureState::Failed(_)
        )
    }

    /// True if `retry` is accepted from this state
    pub fn can_retry(&self) -> bool {
        matches!(self, CaptureState::NoFaceFound | CaptureState::Failed(_))
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful end of a capture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum ScanOutcome {
    Classified(ClassificationResult),
    /// No usable face; the caller should offer a new capture
    NoFaceFound,
}

impl ScanOutcome {
    pub fn classification(&self) -> Option<&ClassificationResult> {
        match self {
            ScanOutcome::Classified(result) => Some(result),
            ScanOutcome::NoFaceFound => None,
        }
    }
}

/// One capture-detect-classify sequence
#[derive(Debug, Clone)]
pub struct CaptureSession {
    sampler: FaceSampler,
    state: CaptureState,
}

impl CaptureSession {
    pub fn new(sampler: FaceSampler) -> Self {
        Self {
            sampler,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn sampler(&self) -> &FaceSampler {
        &self.sampler
    }

    /// An image was captured or uploaded: Idle to Detecting
    pub fn begin(&mut self, source: SampleSource) -> Result<()> {
        match self.state {
            CaptureState::Idle => {
                debug!("Capture session started from {:?}", source);
                self.state = CaptureState::Detecting(source);
                Ok(())
            }
            _ => Err(self.invalid("begin")),
        }
    }

    /// Detect, sample and classify `image`
    ///
    /// Must be called in `Detecting`. A missing face or an incomplete landmark
    /// set ends in `NoFaceFound`. A detector error moves the session to
    /// `Failed` and is returned.
    pub fn run<D>(&mut self, detector: &D, image: &RgbImage) -> Result<ScanOutcome>
    where
        D: FaceLandmarker + ?Sized,
    {
        let source = match self.state {
            CaptureState::Detecting(source) => source,
            _ => return Err(self.invalid("run")),
        };

        let landmarks = match detector.detect_face(image) {
            Ok(Some(landmarks)) => landmarks,
            Ok(None) => {
                info!("No face found in {:?} image", source);
                self.state = CaptureState::NoFaceFound;
                return Ok(ScanOutcome::NoFaceFound);
            }
            Err(err) => {
                warn!("Face detection failed: {}", err);
                self.state = CaptureState::Failed(err.to_string());
                return Err(err);
            }
        };

        let indices = &self.sampler.config().landmark_indices;
        if !landmarks.covers(indices) {
            info!(
                "Detector returned {} landmarks, need indices {:?}",
                landmarks.len(),
                indices
            );
            self.state = CaptureState::NoFaceFound;
            return Ok(ScanOutcome::NoFaceFound);
        }

        self.state = CaptureState::Sampling;
        match self.sampler.sample(image, &landmarks, source) {
            Ok(result) => {
                self.state = CaptureState::Classified(result.clone());
                Ok(ScanOutcome::Classified(result))
            }
            Err(err) => {
                warn!("Sampling failed: {}", err);
                self.state = CaptureState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Back to Idle after `NoFaceFound` or `Failed`
    pub fn retry(&mut self) -> Result<()> {
        if !self.state.can_retry() {
            return Err(self.invalid("retry"));
        }
        debug!("Retrying capture after {}", self.state);
        self.state = CaptureState::Idle;
        Ok(())
    }

    /// Abandon the session from any state
    pub fn reset(&mut self) {
        self.state = CaptureState::Idle;
    }

    fn invalid(&self, event: &str) -> AnalysisError {
        AnalysisError::InvalidStateTransition {
            from: self.state.name().to_string(),
            event: event.to_string(),
        }
    }
}

/// Classify the face in an uploaded image file
///
/// # Arguments
///
/// * `path` - Image file to decode
/// * `detector` - Face-landmark detector to run on the decoded image
/// * `config` - Pipeline configuration; validated before use
///
/// # Errors
///
/// Returns `ConfigError`/`InvalidParameter` for a bad configuration,
/// `ImageLoadError` if the file cannot be decoded and `DetectorError` if the
/// detector fails. A missing face is `Ok(ScanOutcome::NoFaceFound)`.
pub fn analyze_face<D>(path: &Path, detector: &D, config: &PipelineConfig) -> Result<ScanOutcome>
where
    D: FaceLandmarker + ?Sized,
{
    let sampler = FaceSampler::from_config(config)?;
    let image = load_image(path)?;

    let mut session = CaptureSession::new(sampler);
    session.begin(SampleSource::Upload)?;
    session.run(detector, &image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FaceLandmarks, Landmark, StaticLandmarker};
    use crate::tone::ToneId;
    use image::Rgb;
    use std::cell::Cell;

    fn session() -> CaptureSession {
        CaptureSession::new(FaceSampler::from_config(&PipelineConfig::default()).unwrap())
    }

    fn skin_image() -> RgbImage {
        RgbImage::from_pixel(64, 64, Rgb([207, 158, 118]))
    }

    fn full_face() -> FaceLandmarks {
        FaceLandmarks::new(vec![Landmark::new(0.5, 0.5); 478])
    }

    #[test]
    fn test_happy_path() {
        let mut session = session();
        session.begin(SampleSource::Capture).unwrap();
        assert_eq!(session.state(), &CaptureState::Detecting(SampleSource::Capture));

        let outcome = session
            .run(&StaticLandmarker::Face(full_face()), &skin_image())
            .unwrap();
        let result = outcome.classification().unwrap();
        assert_eq!(result.tone_id, ToneId::new(3).unwrap());
        assert_eq!(result.sample.source, SampleSource::Capture);
        assert!(matches!(session.state(), CaptureState::Classified(_)));
        assert!(session.state().is_terminal());
    }

    #[test]
    fn test_no_face_never_samples() {
        let calls = Cell::new(0);
        let detector = |_: &RgbImage| -> Result<Option<FaceLandmarks>> {
            calls.set(calls.get() + 1);
            Ok(None)
        };

        let mut session = session();
        session.begin(SampleSource::Upload).unwrap();
        let outcome = session.run(&detector, &skin_image()).unwrap();

        assert_eq!(outcome, ScanOutcome::NoFaceFound);
        assert_eq!(session.state(), &CaptureState::NoFaceFound);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_incomplete_landmarks_is_no_face() {
        // Sampling these would fail with InvalidParameter; NoFaceFound shows it never ran
        let partial = FaceLandmarks::new(vec![Landmark::new(0.5, 0.5); 100]);
        let mut session = session();
        session.begin(SampleSource::Capture).unwrap();

        let outcome = session
            .run(&StaticLandmarker::Face(partial), &skin_image())
            .unwrap();
        assert_eq!(outcome, ScanOutcome::NoFaceFound);

        let empty = StaticLandmarker::Face(FaceLandmarks::default());
        session.retry().unwrap();
        session.begin(SampleSource::Capture).unwrap();
        assert_eq!(session.run(&empty, &skin_image()).unwrap(), ScanOutcome::NoFaceFound);
    }

    #[test]
    fn test_detector_error_fails_then_retries() {
        let mut session = session();
        session.begin(SampleSource::Capture).unwrap();

        let failing = StaticLandmarker::Failing("delegate crashed".into());
        let err = session.run(&failing, &skin_image()).unwrap_err();
        assert!(err.is_recoverable());
        match session.state() {
            CaptureState::Failed(message) => assert!(message.contains("delegate crashed")),
            other => panic!("unexpected state {:?}", other),
        }

        session.retry().unwrap();
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_invalid_transitions_leave_state() {
        let mut session = session();

        let err = session.run(&StaticLandmarker::NoFace, &skin_image()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidStateTransition { .. }));
        assert_eq!(session.state(), &CaptureState::Idle);
        assert!(session.retry().is_err());

        session.begin(SampleSource::Upload).unwrap();
        assert!(session.begin(SampleSource::Upload).is_err());
        assert_eq!(session.state(), &CaptureState::Detecting(SampleSource::Upload));

        session
            .run(&StaticLandmarker::Face(full_face()), &skin_image())
            .unwrap();
        let err = session.retry().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid capture transition: cannot retry while classified"
        );

        session.reset();
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&ScanOutcome::NoFaceFound).unwrap();
        assert_eq!(json, r#"{"status":"no_face_found"}"#);
    }

    #[test]
    fn test_analyze_face_missing_file() {
        let err = analyze_face(
            Path::new("/nonexistent/face.png"),
            &StaticLandmarker::NoFace,
            &PipelineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
    }
}
