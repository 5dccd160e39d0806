use std::path::Path;

use tracing::{debug, info};

use crate::consts::DISC_FILL_RATIO;
use crate::error::Result;
use crate::frame::{Frame, FrameSource};

use super::annotate::crop_regions;
use super::components::{find_blobs, Blob};
use super::config::LocalizerConfig;
use super::morphology::opening;
use super::threshold::compute_threshold;
use super::types::{DetectionSet, TouchDetection, TouchRegion};

/// Locates touch indicators in a video's frames.
pub trait TouchLocalizer {
    /// Run localization over every frame of `source`, replacing any previous
    /// result. Detections come back without opacity scores.
    fn execute_detection(&mut self, source: &mut dyn FrameSource) -> Result<()>;

    /// Detections from the last `execute_detection` call.
    fn detections(&self) -> &DetectionSet;

    /// Crop the region around each detection, in detection order. When
    /// `overlay_dir` is given, frames with drawn bounding boxes are written
    /// there as PNG.
    fn annotate(
        &self,
        source: &mut dyn FrameSource,
        overlay_dir: Option<&Path>,
    ) -> Result<Vec<TouchRegion>> {
        crop_regions(self.detections(), source, overlay_dir)
    }
}

/// Finds the bright, disc-shaped "show touches" indicator Android draws
/// under the finger.
pub struct BlobTouchLocalizer {
    config: LocalizerConfig,
    detections: DetectionSet,
}

impl BlobTouchLocalizer {
    pub fn new(config: LocalizerConfig) -> Self {
        Self {
            config,
            detections: DetectionSet::new(),
        }
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }
}

impl TouchLocalizer for BlobTouchLocalizer {
    fn execute_detection(&mut self, source: &mut dyn FrameSource) -> Result<()> {
        let mut detections = DetectionSet::new();
        let mut frame_count = 0usize;

        for frame in source.frames()? {
            let frame = frame?;
            for detection in detect_touches_in_frame(&frame, &self.config) {
                detections.push(detection);
            }
            frame_count += 1;
        }

        info!(
            frames = frame_count,
            detections = detections.len(),
            "Touch localization complete"
        );
        self.detections = detections;
        Ok(())
    }

    fn detections(&self) -> &DetectionSet {
        &self.detections
    }
}

/// Detect touch indicators in a single frame.
///
/// Pipeline: threshold -> opening -> connected components -> shape filter.
/// Detections are in reading order (top to bottom, left to right).
pub fn detect_touches_in_frame(frame: &Frame, config: &LocalizerConfig) -> Vec<TouchDetection> {
    if frame.width() == 0 || frame.height() == 0 {
        return Vec::new();
    }

    let threshold =
        compute_threshold(&frame.data, &config.threshold_method, config.sigma_multiplier);
    let mask = frame.data.mapv(|v| v > threshold);
    let opened = opening(&mask, config.opening_radius);

    let touches: Vec<TouchDetection> = find_blobs(&opened)
        .into_iter()
        .filter(|blob| is_touch_shaped(blob, config))
        .map(|blob| {
            TouchDetection::new(frame.index, frame.timestamp_ms, blob.bbox, disc_confidence(&blob))
        })
        .collect();

    if !touches.is_empty() {
        debug!(frame = frame.index, threshold, touches = touches.len(), "Frame has touches");
    }
    touches
}

fn is_touch_shaped(blob: &Blob, config: &LocalizerConfig) -> bool {
    blob.area >= config.min_area
        && blob.area <= config.max_area
        && blob.aspect_ratio() <= config.max_aspect_ratio
        && blob.fill_ratio() >= config.min_fill_ratio
}

/// 1.0 for a perfect disc, falling off linearly with fill ratio deviation.
fn disc_confidence(blob: &Blob) -> f64 {
    let deviation = (blob.fill_ratio() - DISC_FILL_RATIO).abs() / DISC_FILL_RATIO;
    (1.0 - deviation).clamp(0.0, 1.0)
}
