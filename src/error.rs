//! Error types for the vesto_core library

use thiserror::Error;

/// Result type alias for vesto_core operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for skin-tone analysis and outfit matching
///
/// A face that could not be found is not an error: it is reported as
/// [`ScanOutcome::NoFaceFound`](crate::pipeline::ScanOutcome::NoFaceFound).
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file or buffer could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The face-landmark detector failed unexpectedly
    #[error("Face detector error: {message}")]
    DetectorError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, written or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Capture flow was driven out of order
    #[error("Invalid capture transition: cannot {event} while {from}")]
    InvalidStateTransition { from: String, event: String },

    /// Generic processing error
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a detector error with context
    pub fn detector<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DetectorError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for [`AnalysisError::InvalidParameter`]
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if retrying with a new capture may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::ImageLoadError { .. } | AnalysisError::DetectorError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not read the photo. Please try a different image.".to_string()
            }
            AnalysisError::DetectorError { .. } => {
                "Face analysis failed unexpectedly. Please try again.".to_string()
            }
            AnalysisError::ConfigError { .. } | AnalysisError::InvalidParameter { .. } => {
                "The skin tone finder is misconfigured.".to_string()
            }
            _ => "Skin tone analysis failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_error_is_recoverable() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "gpu lost");
        let err = AnalysisError::detector("inference failed", io);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("inference failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = AnalysisError::invalid_parameter("window_size", 4);
        assert_eq!(err.to_string(), "Invalid parameter: window_size = 4");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_message_for_transition() {
        let err = AnalysisError::InvalidStateTransition {
            from: "Idle".into(),
            event: "run".into(),
        };
        assert!(err.user_message().contains("try again"));
    }
}
