use ndarray::{s, Array2};
use tracing::debug;

use crate::error::{Result, V2sError};

use super::config::OpacityConfig;
use super::threshold::{mean_stddev, median};
use super::types::{OpacityPrediction, TouchRegion};

/// Scores how visible each touch indicator is.
pub trait OpacityClassifier {
    /// Return one prediction per region, in the same order.
    fn classify(&mut self, regions: &[TouchRegion]) -> Result<Vec<OpacityPrediction>>;
}

/// Opacity from local contrast: how far the crop's centre rises above the
/// median of its border, relative to the headroom left above that border.
pub struct ContrastOpacityClassifier {
    config: OpacityConfig,
}

impl ContrastOpacityClassifier {
    pub fn new(config: OpacityConfig) -> Self {
        Self { config }
    }
}

impl OpacityClassifier for ContrastOpacityClassifier {
    fn classify(&mut self, regions: &[TouchRegion]) -> Result<Vec<OpacityPrediction>> {
        let predictions = regions
            .iter()
            .map(|region| -> Result<OpacityPrediction> {
                let opacity = region_opacity(&region.pixels, self.config.border).ok_or_else(|| {
                    V2sError::Classifier(format!(
                        "empty crop for detection {} in frame {}",
                        region.detection, region.frame
                    ))
                })?;
                Ok(OpacityPrediction {
                    detection: region.detection,
                    opacity,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(predictions = predictions.len(), "Opacity classification complete");
        Ok(predictions)
    }
}

/// Contrast score in [0.0, 1.0], or `None` for an empty crop.
pub fn region_opacity(pixels: &Array2<f32>, border: usize) -> Option<f64> {
    let (h, w) = pixels.dim();
    if h == 0 || w == 0 {
        return None;
    }

    let strip = border.min(h / 2).min(w / 2);
    let ring: Vec<f32> = pixels
        .indexed_iter()
        .filter(|((r, c), _)| *r < strip || *r >= h - strip || *c < strip || *c >= w - strip)
        .map(|(_, &v)| v)
        .collect();
    let background = median(ring).unwrap_or(0.0) as f64;

    let centre = pixels.slice(s![h / 4..h - h / 4, w / 4..w - w / 4]);
    let (peak, _) = if centre.is_empty() {
        mean_stddev(pixels.iter().copied())
    } else {
        mean_stddev(centre.iter().copied())
    };

    let headroom = 1.0 - background;
    if headroom <= f64::EPSILON {
        return Some(0.0);
    }
    Some(((peak - background) / headroom).clamp(0.0, 1.0))
}
