use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum V2sError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input is neither a file nor a directory: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("Unsupported video container: {}", .0.display())]
    UnsupportedVideo(PathBuf),

    #[error("Frame source error: {0}")]
    FrameSource(String),

    #[error("Touch localizer error: {0}")]
    Localizer(String),

    #[error("Opacity classifier error: {0}")]
    Classifier(String),

    #[error("Correlation mismatch: {detections} detections but {predictions} opacity predictions")]
    CorrelationMismatch { detections: usize, predictions: usize },

    #[error("Opacity prediction at position {position} targets detection {detection}")]
    MisalignedPrediction { position: usize, detection: usize },

    #[error("Detection {index} has no opacity score")]
    IncompleteDetection { index: usize },

    #[error("Detection {index} has a non-finite {field}")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("Frame {frame} referenced by a detection was not produced by the frame source")]
    MissingFrame { frame: u64 },

    #[error("Malformed artifact {}: {reason}", .path.display())]
    Artifact { path: PathBuf, reason: String },

}

pub type Result<T> = std::result::Result<T, V2sError>;
