pub mod annotate;
pub mod components;
pub mod config;
pub mod correlate;
pub mod localizer;
pub mod morphology;
pub mod opacity;
pub mod threshold;
pub mod types;

pub use config::{LocalizerConfig, OpacityConfig, ThresholdMethod};
pub use correlate::correlate;
pub use localizer::{detect_touches_in_frame, BlobTouchLocalizer, TouchLocalizer};
pub use opacity::{ContrastOpacityClassifier, OpacityClassifier};
pub use types::{BoundingBox, DetectionSet, OpacityPrediction, TouchDetection, TouchRegion};
